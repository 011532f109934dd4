use std::sync::Arc;

use alloy::signers::local::PrivateKeySigner;

use crate::config::errors::ConfigError;
use crate::config::network_config::NetworkConfig;
use crate::infra::ProvidersRegistry;
use crate::services::contract_factory::ContractFactory;

#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<ContractFactory>,
}

impl AppState {
    pub fn new(factory: ContractFactory) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Builds registries and connections once; they stay read-only afterwards.
    pub async fn build(
        network_config: &NetworkConfig,
        signer: Option<PrivateKeySigner>,
    ) -> Result<Arc<Self>, ConfigError> {
        let contracts = network_config.contracts_registry()?;
        let providers = ProvidersRegistry::connect(network_config, signer).await;

        Ok(Arc::new(Self::new(ContractFactory::new(providers, contracts))))
    }
}
