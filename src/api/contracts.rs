use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::app_error::AppError;
use crate::app_state::AppState;
use crate::domain::{ContractVersion, NetworkId, RegistryError};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContractVersionsResponse {
    pub network: NetworkId,
    pub contract: String,
    pub versions: Vec<ContractVersion>,
}

pub async fn get_contract_versions(
    Path((network, name)): Path<(NetworkId, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContractVersionsResponse>, AppError> {
    let versions = state
        .factory
        .for_network(network.clone())?
        .history(&name)?
        .records()
        .to_vec();

    Ok(Json(ContractVersionsResponse {
        network,
        contract: name,
        versions,
    }))
}

pub async fn get_latest_contract(
    Path((network, name)): Path<(NetworkId, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContractVersion>, AppError> {
    let version = state
        .factory
        .for_network(network)?
        .history(&name)?
        .latest_record()
        .map_err(RegistryError::not_found(&name))?;

    Ok(Json(version))
}

pub async fn get_contract_version(
    Path((network, name, index)): Path<(NetworkId, String, usize)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContractVersion>, AppError> {
    let version = state
        .factory
        .for_network(network)?
        .history(&name)?
        .record(index)
        .map_err(RegistryError::not_found(&name))?;

    Ok(Json(version))
}

pub async fn get_contract_at_block(
    Path((network, name, block)): Path<(NetworkId, String, u64)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContractVersion>, AppError> {
    let version = state
        .factory
        .for_network(network)?
        .history(&name)?
        .record_at_block(block)
        .map_err(RegistryError::not_found(&name))?;

    Ok(Json(version))
}
