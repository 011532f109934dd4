use std::ops::Deref;

use alloy::primitives::{Address, Bytes};
use alloy::providers::DynProvider;

use crate::config::constants::MULTICALL3_ADDRESS;
use crate::domain::{ContractVersion, NetworkId, RegistryError};
use crate::infra::ProvidersRegistry;
use crate::registry::{
    ContractVersions, NetworkContracts, NetworksContractsRegistry, ResolvedContract, VersionHistory,
};
use crate::services::errors::MulticallError;
use crate::evm::RawCall;
use crate::services::multicall::{self, BatchOutput, CallBatch, MulticallContext};

pub struct ContractInstance<C, D> {
    version: ContractVersion,
    contract: C,
    multicall: D,
}

impl<C, D> ContractInstance<C, D> {
    fn connect(resolved: ResolvedContract<C, D>, connection: DynProvider) -> Self {
        Self {
            version: resolved.version(),
            contract: resolved.instance(connection),
            multicall: resolved.deferred(),
        }
    }

    pub fn address(&self) -> Address {
        self.version.address
    }

    pub fn deployed_at(&self) -> u64 {
        self.version.deployed_at
    }

    pub fn multicall(&self) -> &D {
        &self.multicall
    }

    pub fn into_inner(self) -> C {
        self.contract
    }
}

impl<C, D> Deref for ContractInstance<C, D> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.contract
    }
}

pub struct ContractFactory {
    providers: ProvidersRegistry,
    contracts: NetworksContractsRegistry,
}

impl ContractFactory {
    pub fn new(providers: ProvidersRegistry, contracts: NetworksContractsRegistry) -> Self {
        Self {
            providers,
            contracts,
        }
    }

    pub fn providers(&self) -> &ProvidersRegistry {
        &self.providers
    }

    pub fn contracts(&self) -> &NetworksContractsRegistry {
        &self.contracts
    }

    pub fn network_available(&self, network: &NetworkId) -> bool {
        self.providers.network_available(network) && self.contracts.network_available(network)
    }

    pub fn for_network(
        &self,
        network: impl Into<NetworkId>,
    ) -> Result<NetworkContractFactory<'_>, RegistryError> {
        let network = network.into();
        let connection = self.providers.for_network(&network)?;
        let aggregator = self.providers.multicall_for_network(&network)?;

        self.bind(network, connection, aggregator.address)
    }

    /// Uses `connection` instead of the registered provider, e.g. a signer.
    pub fn for_network_with(
        &self,
        network: impl Into<NetworkId>,
        connection: DynProvider,
    ) -> Result<NetworkContractFactory<'_>, RegistryError> {
        let network = network.into();
        let aggregator = self
            .providers
            .multicall_for_network(&network)
            .map(|aggregator| aggregator.address)
            .unwrap_or(MULTICALL3_ADDRESS);

        self.bind(network, connection, aggregator)
    }

    fn bind(
        &self,
        network: NetworkId,
        connection: DynProvider,
        aggregator: Address,
    ) -> Result<NetworkContractFactory<'_>, RegistryError> {
        let contracts = self.contracts.for_network(&network)?;

        Ok(NetworkContractFactory {
            network,
            connection,
            aggregator,
            contracts,
        })
    }
}

pub struct NetworkContractFactory<'a> {
    network: NetworkId,
    connection: DynProvider,
    aggregator: Address,
    contracts: &'a NetworkContracts,
}

impl<'a> NetworkContractFactory<'a> {
    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    pub fn connection(&self) -> &DynProvider {
        &self.connection
    }

    pub fn aggregator(&self) -> Address {
        self.aggregator
    }

    pub fn contracts(&self) -> &'a NetworkContracts {
        self.contracts
    }

    pub fn history(&self, name: &str) -> Result<&'a dyn VersionHistory, RegistryError> {
        self.contracts.history(name)
    }

    pub fn get_contract_versions<C, D>(
        &self,
        name: &str,
    ) -> Result<&'a ContractVersions<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        self.contracts.get_contract_versions(name)
    }

    pub fn get_contract<C, D>(
        &self,
        name: &str,
        version: usize,
    ) -> Result<ResolvedContract<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        self.get_contract_versions(name)?
            .get_version(version)
            .map_err(RegistryError::not_found(name))
    }

    pub fn get_contract_at_block<C, D>(
        &self,
        name: &str,
        block: u64,
    ) -> Result<ResolvedContract<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        self.get_contract_versions(name)?
            .at_block(block)
            .map_err(RegistryError::not_found(name))
    }

    pub fn get_latest_contract<C, D>(&self, name: &str) -> Result<ResolvedContract<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        self.get_contract_versions(name)?
            .latest()
            .map_err(RegistryError::not_found(name))
    }

    pub fn get_latest_contract_instance<C, D>(
        &self,
        name: &str,
    ) -> Result<ContractInstance<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        let resolved = self.get_latest_contract(name)?;
        Ok(self.instantiate(name, resolved))
    }

    pub fn get_contract_instance_at_block<C, D>(
        &self,
        name: &str,
        block: u64,
    ) -> Result<ContractInstance<C, D>, RegistryError>
    where
        C: 'static,
        D: Send + 'static,
    {
        let resolved = self.get_contract_at_block(name, block)?;
        Ok(self.instantiate(name, resolved))
    }

    // registry errors from `build` abort before anything is sent
    pub async fn multi_call<B, F>(&self, build: F) -> Result<BatchOutput<B>, MulticallError>
    where
        B: CallBatch,
        F: FnOnce(&MulticallContext<'a>) -> Result<B, RegistryError>,
    {
        let batch = build(&MulticallContext::new(self.contracts))?;
        multicall::aggregate(&self.connection, self.aggregator, &self.network, batch).await
    }

    pub async fn multi_call_raw<F>(&self, build: F) -> Result<Vec<Bytes>, MulticallError>
    where
        F: FnOnce(&MulticallContext<'a>) -> Result<Vec<RawCall>, RegistryError>,
    {
        let calls = build(&MulticallContext::new(self.contracts))?;
        multicall::aggregate_raw(&self.connection, self.aggregator, &self.network, calls).await
    }

    fn instantiate<C, D>(&self, name: &str, resolved: ResolvedContract<C, D>) -> ContractInstance<C, D> {
        tracing::debug!(
            network = %self.network,
            contract = name,
            address = %resolved.address,
            deployed_at = resolved.deployed_at,
            "contract instance created"
        );

        ContractInstance::connect(resolved, self.connection.clone())
    }
}
