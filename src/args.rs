use alloy::signers::local::PrivateKeySigner;
use clap::Parser;

use crate::config::constants::{DEFAULT_CONFIG_PATH, DEFAULT_HTTP_BIND};
use crate::config::errors::ConfigError;

#[derive(Parser, Debug, Clone)]
pub struct Args {
    #[arg(long, env = "HTTP_BIND", default_value = DEFAULT_HTTP_BIND)]
    pub bind: String,

    #[arg(long, env = "CONTRACTS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: String,

    #[arg(long, env = "PRIVATE_KEY", default_value = "", hide_env_values = true, hide_default_value = true)]
    private_key: String,

    #[arg(long = "allowed-origins", env = "ALLOWED_ORIGINS", default_value = "")]
    allowed_origins_from_env: String,
}

impl Args {
    pub fn from_env() -> Self {
        Self::parse()
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins_from_env
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Signer for wallet-backed connections, if a private key is set.
    pub fn signer(&self) -> Result<Option<PrivateKeySigner>, ConfigError> {
        if self.private_key.is_empty() {
            return Ok(None);
        }

        self.private_key
            .parse::<PrivateKeySigner>()
            .map(Some)
            .map_err(|err| ConfigError::InvalidPrivateKey(err.to_string()))
    }
}
