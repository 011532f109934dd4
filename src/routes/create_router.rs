use crate::api::contracts::{
    get_contract_at_block, get_contract_version, get_contract_versions, get_latest_contract,
};
use crate::api::multicall::multicall;
use crate::api::networks::get_networks;
use crate::app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Empty `allowed_origins` allows every origin. A `*` in an entry stands for
/// any non-empty run of characters.
pub fn origin_allowed(allowed_origins: &[String], origin: &str) -> bool {
    if allowed_origins.is_empty() {
        return true;
    }

    allowed_origins.iter().any(|allowed| match allowed.split_once('*') {
        Some((prefix, suffix)) => {
            origin.len() > prefix.len() + suffix.len()
                && origin.starts_with(prefix)
                && origin.ends_with(suffix)
        }
        None => origin == allowed,
    })
}

pub fn create_router(app_state: Arc<AppState>, allowed_origins: Vec<String>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin_allowed(&allowed_origins, origin.to_str().unwrap_or(""))
        }))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/networks", get(get_networks))
        .route("/{network}/contracts/{name}", get(get_contract_versions))
        .route("/{network}/contracts/{name}/latest", get(get_latest_contract))
        .route(
            "/{network}/contracts/{name}/versions/{index}",
            get(get_contract_version),
        )
        .route("/{network}/contracts/{name}/at/{block}", get(get_contract_at_block))
        .route("/{network}/multicall", post(multicall))
        .layer(cors)
        .with_state(app_state)
}
