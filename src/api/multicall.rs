use std::sync::Arc;

use alloy::primitives::Bytes;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app_error::AppError;
use crate::app_state::AppState;
use crate::domain::NetworkId;
use crate::evm::DeferredContract;

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MulticallItem {
    contract: String,
    call_data: Bytes,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MulticallRequest {
    calls: Vec<MulticallItem>,
}

#[derive(Serialize, Debug)]
pub struct MulticallResponse {
    pub results: Vec<Bytes>,
}

pub async fn multicall(
    Path(network): Path<NetworkId>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<MulticallRequest>,
) -> Result<Json<MulticallResponse>, AppError> {
    if body.calls.is_empty() {
        return Err(AppError::BadRequest("calls should not be empty".into()));
    }

    let factory = state.factory.for_network(network)?;
    let results = factory
        .multi_call_raw(|c| {
            body.calls
                .iter()
                .map(|item| {
                    c.get::<DeferredContract>(&item.contract)
                        .map(|contract| contract.raw(item.call_data.clone()))
                })
                .collect()
        })
        .await?;

    Ok(Json(MulticallResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support;
    use crate::domain::RegistryError;
    use crate::services::errors::MulticallError;
    use alloy::providers::bindings::IMulticall3;
    use alloy::sol_types::SolCall;
    use alloy::transports::mock::Asserter;
    use axum::http::StatusCode;

    fn request(calls: &[(&str, u8)]) -> Json<MulticallRequest> {
        Json(MulticallRequest {
            calls: calls
                .iter()
                .map(|(contract, data)| MulticallItem {
                    contract: contract.to_string(),
                    call_data: Bytes::from(vec![*data]),
                })
                .collect(),
        })
    }

    #[tokio::test]
    async fn returns_raw_results_in_request_order() {
        let asserter = Asserter::new();
        let response: Bytes = IMulticall3::aggregate3Call::abi_encode_returns(&vec![
            IMulticall3::Result { success: true, returnData: Bytes::from(vec![0x0a]) },
            IMulticall3::Result { success: true, returnData: Bytes::from(vec![0x0b]) },
            IMulticall3::Result { success: true, returnData: Bytes::from(vec![0x0c]) },
        ])
        .into();
        asserter.push_success(&response);

        let Json(body) = multicall(
            Path(NetworkId::from(250u64)),
            State(test_support::state(&asserter)),
            request(&[("token", 1), ("staking", 2), ("token", 3)]),
        )
        .await
        .unwrap();

        assert_eq!(
            body.results,
            vec![Bytes::from(vec![0x0a]), Bytes::from(vec![0x0b]), Bytes::from(vec![0x0c])]
        );
    }

    #[tokio::test]
    async fn reverted_batch_is_bad_gateway() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("execution reverted");

        let err = multicall(
            Path(NetworkId::from(250u64)),
            State(test_support::state(&asserter)),
            request(&[("token", 1), ("staking", 2)]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Multicall(MulticallError::AggregateCallFailed { .. })));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected_before_sending() {
        let asserter = Asserter::new();
        let state = test_support::state(&asserter);

        let err = multicall(Path(NetworkId::from(250u64)), State(Arc::clone(&state)), request(&[]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = multicall(
            Path(NetworkId::from("test")),
            State(state),
            request(&[("token", 1), ("staking", 2)]),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Multicall(MulticallError::Registry(RegistryError::ContractUnavailable(_)))
        ));
    }
}
