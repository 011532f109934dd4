use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// One deployment of a named contract.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractVersion {
    pub address: Address,
    pub deployed_at: u64,
}

impl ContractVersion {
    pub fn new(address: Address, deployed_at: u64) -> Self {
        Self { address, deployed_at }
    }
}
