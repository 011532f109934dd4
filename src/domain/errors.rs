use thiserror::Error;

use crate::domain::NetworkId;

#[derive(Debug, Clone, Error)]
pub enum EvmError {
    #[error("Network with id {0} is not supported")]
    UnsupportedNetwork(u64),
}

/// Why a version lookup inside one contract history came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("version {index} is out of range, {count} versions registered")]
    Index { index: usize, count: usize },

    #[error("no version deployed at or before block {0}")]
    Block(u64),

    #[error("no versions registered")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("contract {contract}: {source}")]
    NotFound { contract: String, source: NotFound },

    #[error("Network {0} is not available")]
    NetworkUnavailable(NetworkId),

    #[error("Contract {0} is not available on this network")]
    ContractUnavailable(String),

    #[error("Contract {0} is registered with different bindings")]
    BindingsMismatch(String),

    #[error("Contract {0} is already registered on this network")]
    DuplicateContract(String),
}

impl RegistryError {
    pub(crate) fn not_found(contract: &str) -> impl FnOnce(NotFound) -> RegistryError + '_ {
        move |source| RegistryError::NotFound {
            contract: contract.to_string(),
            source,
        }
    }
}
