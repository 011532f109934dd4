use std::collections::{BTreeMap, HashMap};
use std::fs;

use alloy::primitives::Address;
use serde::Deserialize;
use serde_with::rust::maps_duplicate_key_is_error;

use crate::config::constants::MULTICALL3_ADDRESS;
use crate::config::errors::ConfigError;
use crate::domain::{ContractVersion, EvmNetwork, NetworkId};
use crate::evm::Bindings;
use crate::registry::{ContractVersions, NetworkContracts, NetworksContractsRegistry};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub http_rpc: Vec<String>,
    #[serde(default)]
    pub ws_rpc: Vec<String>,
    #[serde(default)]
    pub multicall: Option<Address>,
    #[serde(default, deserialize_with = "maps_duplicate_key_is_error::deserialize")]
    pub contracts: BTreeMap<String, Vec<ContractVersion>>,
}

// "250" and "0250" parse to the same id, so they count as duplicates
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct NetworkConfig {
    #[serde(deserialize_with = "maps_duplicate_key_is_error::deserialize")]
    networks: HashMap<NetworkId, NetworkEntry>,
}

impl NetworkConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_string(), err.to_string()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;

        for network in config.networks.keys() {
            config.chain_id(network)?;
        }

        Ok(config)
    }

    pub fn insert(&mut self, network: impl Into<NetworkId>, entry: NetworkEntry) {
        self.networks.insert(network.into(), entry);
    }

    pub fn networks(&self) -> impl Iterator<Item = (&NetworkId, &NetworkEntry)> {
        self.networks.iter()
    }

    pub fn entry(&self, network: &NetworkId) -> Option<&NetworkEntry> {
        self.networks.get(network)
    }

    pub fn chain_id(&self, network: &NetworkId) -> Result<u64, ConfigError> {
        self.entry(network)
            .and_then(|entry| entry.chain_id)
            .or_else(|| network.chain_id())
            .ok_or_else(|| ConfigError::MissingChainId(network.clone()))
    }

    pub fn http_rpc(&self, network: &NetworkId) -> Option<String> {
        let configured = self
            .entry(network)
            .and_then(|entry| entry.http_rpc.first().cloned());

        configured.or_else(|| {
            self.known_network(network)
                .and_then(|known| known.default_http_rpc())
                .map(str::to_string)
        })
    }

    pub fn ws_rpc(&self, network: &NetworkId) -> Option<String> {
        let configured = self
            .entry(network)
            .and_then(|entry| entry.ws_rpc.first().cloned());

        configured.or_else(|| {
            self.known_network(network)
                .and_then(|known| known.default_ws_rpc())
                .map(str::to_string)
        })
    }

    pub fn multicall_address(&self, network: &NetworkId) -> Address {
        self.entry(network)
            .and_then(|entry| entry.multicall)
            .unwrap_or(MULTICALL3_ADDRESS)
    }

    /// File contracts carry no ABI and are bound with [`Bindings::raw`].
    pub fn contracts_registry(&self) -> Result<NetworksContractsRegistry, ConfigError> {
        let mut registry = NetworksContractsRegistry::new();

        for (network, entry) in &self.networks {
            let mut contracts = NetworkContracts::new();

            for (name, deployments) in &entry.contracts {
                let mut versions = ContractVersions::new(Bindings::raw());
                for deployment in deployments {
                    versions.add(*deployment);
                }

                contracts
                    .register(name.clone(), versions)
                    .map_err(|err| ConfigError::Contracts(network.clone(), err))?;
            }

            tracing::info!(%network, contracts = contracts.len(), "contracts registry built");
            registry.add_network(network.clone(), contracts);
        }

        Ok(registry)
    }

    fn known_network(&self, network: &NetworkId) -> Option<EvmNetwork> {
        self.chain_id(network)
            .ok()
            .and_then(|id| EvmNetwork::try_from(id).ok())
    }
}
