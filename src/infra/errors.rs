use alloy::transports::TransportError;
use thiserror::Error;

use crate::domain::RegistryError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("websocket connection failed: {0}")]
    Transport(#[from] TransportError),
}
