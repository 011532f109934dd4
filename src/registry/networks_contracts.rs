use std::collections::HashMap;

use crate::domain::{NetworkId, RegistryError};
use crate::registry::network_contracts::NetworkContracts;

#[derive(Debug, Default)]
pub struct NetworksContractsRegistry {
    map: HashMap<NetworkId, NetworkContracts>,
}

impl NetworksContractsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_network(&mut self, network: impl Into<NetworkId>, registry: NetworkContracts) {
        let network = network.into();
        if self.map.insert(network.clone(), registry).is_some() {
            tracing::info!(%network, "contracts registry for network was replaced");
        }
    }

    pub fn network_available(&self, network: &NetworkId) -> bool {
        self.map.contains_key(network)
    }

    pub fn for_network(&self, network: &NetworkId) -> Result<&NetworkContracts, RegistryError> {
        self.map
            .get(network)
            .ok_or_else(|| RegistryError::NetworkUnavailable(network.clone()))
    }

    pub fn networks(&self) -> impl Iterator<Item = (&NetworkId, &NetworkContracts)> {
        self.map.iter()
    }
}
