use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app_state::AppState;
use crate::domain::NetworkId;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub network: NetworkId,
    pub chain_id: Option<u64>,
    pub available: bool,
    pub contracts: Vec<String>,
}

pub async fn get_networks(State(state): State<Arc<AppState>>) -> Json<Vec<NetworkResponse>> {
    let factory = &state.factory;

    let mut networks: Vec<NetworkResponse> = factory
        .contracts()
        .networks()
        .map(|(network, contracts)| {
            let mut names: Vec<String> = contracts.names().map(str::to_string).collect();
            names.sort();

            NetworkResponse {
                network: network.clone(),
                chain_id: factory.providers().chain_id(network).ok(),
                available: factory.network_available(network),
                contracts: names,
            }
        })
        .collect();
    networks.sort_by(|a, b| a.network.cmp(&b.network));

    Json(networks)
}
