use std::collections::HashMap;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use futures::future::join_all;

use crate::config::constants::MULTICALL3_ADDRESS;
use crate::config::network_config::NetworkConfig;
use crate::domain::{NetworkId, RegistryError};
use crate::infra::errors::ProviderError;

#[derive(Clone)]
pub struct NetworkProvider {
    pub chain_id: u64,
    pub provider: DynProvider,
    pub multicall: Address,
    pub http_rpc: Option<String>,
    pub ws_rpc: Option<String>,
}

impl NetworkProvider {
    pub fn new(chain_id: u64, provider: DynProvider) -> Self {
        Self {
            chain_id,
            provider,
            multicall: MULTICALL3_ADDRESS,
            http_rpc: None,
            ws_rpc: None,
        }
    }

    pub fn with_multicall(mut self, multicall: Address) -> Self {
        self.multicall = multicall;
        self
    }

    pub fn with_ws_rpc(mut self, ws_rpc: impl Into<String>) -> Self {
        self.ws_rpc = Some(ws_rpc.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    pub chain_id: u64,
    pub address: Address,
}

#[derive(Clone, Default)]
pub struct ProvidersRegistry {
    networks: HashMap<NetworkId, NetworkProvider>,
}

impl ProvidersRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // networks that fail to connect are skipped
    pub async fn connect(config: &NetworkConfig, signer: Option<PrivateKeySigner>) -> Self {
        let signer = signer.as_ref();

        let pending = config.networks().filter_map(|(network, _)| {
            let Some(rpc) = config.http_rpc(network) else {
                tracing::warn!(%network, "no http rpc configured, network skipped");
                return None;
            };
            let chain_id = config.chain_id(network).ok()?;

            Some(async move {
                let connected = connect_http(&rpc, signer).await;
                (network.clone(), chain_id, rpc, connected)
            })
        });

        let mut registry = Self::new();
        for (network, chain_id, rpc, connected) in join_all(pending).await {
            match connected {
                Ok(provider) => {
                    let mut entry = NetworkProvider::new(chain_id, provider)
                        .with_multicall(config.multicall_address(&network));
                    entry.http_rpc = Some(rpc);
                    entry.ws_rpc = config.ws_rpc(&network);

                    tracing::info!(%network, chain_id, "provider connected");
                    registry.add_network(network, entry);
                }
                Err(err) => {
                    tracing::warn!(%network, error = %err, "provider error, network skipped");
                }
            }
        }

        registry
    }

    pub fn add_network(&mut self, network: impl Into<NetworkId>, provider: NetworkProvider) {
        self.networks.insert(network.into(), provider);
    }

    pub fn network_available(&self, network: &NetworkId) -> bool {
        self.networks.contains_key(network)
    }

    pub fn networks(&self) -> impl Iterator<Item = &NetworkId> {
        self.networks.keys()
    }

    pub fn for_network(&self, network: &NetworkId) -> Result<DynProvider, RegistryError> {
        self.entry(network).map(|entry| entry.provider.clone())
    }

    pub fn chain_id(&self, network: &NetworkId) -> Result<u64, RegistryError> {
        self.entry(network).map(|entry| entry.chain_id)
    }

    pub fn multicall_for_network(&self, network: &NetworkId) -> Result<Aggregator, RegistryError> {
        self.entry(network).map(|entry| Aggregator {
            chain_id: entry.chain_id,
            address: entry.multicall,
        })
    }

    pub fn http_url(&self, network: &NetworkId) -> Result<Option<&str>, RegistryError> {
        self.entry(network).map(|entry| entry.http_rpc.as_deref())
    }

    pub fn ws_url(&self, network: &NetworkId) -> Result<Option<&str>, RegistryError> {
        self.entry(network).map(|entry| entry.ws_rpc.as_deref())
    }

    pub async fn ws_for_network(&self, network: &NetworkId) -> Result<Option<DynProvider>, ProviderError> {
        let Some(url) = self.ws_url(network)? else {
            return Ok(None);
        };

        let provider = ProviderBuilder::new().connect(url).await?;
        Ok(Some(provider.erased()))
    }

    fn entry(&self, network: &NetworkId) -> Result<&NetworkProvider, RegistryError> {
        self.networks
            .get(network)
            .ok_or_else(|| RegistryError::NetworkUnavailable(network.clone()))
    }
}

async fn connect_http(
    rpc: &str,
    signer: Option<&PrivateKeySigner>,
) -> Result<DynProvider, TransportError> {
    let provider = match signer {
        Some(signer) => ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect(rpc)
            .await?
            .erased(),
        None => ProviderBuilder::new().connect(rpc).await?.erased(),
    };

    Ok(provider)
}
