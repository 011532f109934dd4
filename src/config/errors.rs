use thiserror::Error;

use crate::domain::{NetworkId, RegistryError};

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Unable to read network config {0}: {1}")]
    Read(String, String),

    #[error("Unable to parse network config: {0}")]
    Parse(String),

    #[error("Chain id is not defined for network {0}")]
    MissingChainId(NetworkId),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid contracts for network {0}: {1}")]
    Contracts(NetworkId, RegistryError),
}
