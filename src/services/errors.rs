use alloy::primitives::Address;
use thiserror::Error;

use crate::domain::{NetworkId, RegistryError};

#[derive(Debug, Clone, Error)]
pub enum CallError {
    #[error("call to {0} failed: {1}")]
    Transport(Address, String),

    #[error("unable to decode return data of {0}: {1}")]
    Decode(Address, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MulticallError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("multicall batch is empty")]
    EmptyBatch,

    #[error("aggregate call on network {network} failed: {reason}")]
    AggregateCallFailed { network: NetworkId, reason: String },
}

impl MulticallError {
    /// Errors caused by registry or batch setup rather than by the chain.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, MulticallError::AggregateCallFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("expected {expected} results, got {actual}")]
    Count { expected: usize, actual: usize },

    #[error("call {0} reported failure")]
    Failed(usize),
}
