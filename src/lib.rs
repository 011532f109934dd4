//! Per-network registry of versioned contract deployments.

pub mod api;
pub mod app_error;
pub mod app_state;
pub mod args;
pub mod config;
pub mod domain;
pub mod evm;
pub mod infra;
pub mod registry;
pub mod routes;
pub mod services;

pub use domain::{ContractVersion, EvmNetwork, NetworkId, NotFound, RegistryError};
pub use evm::{Bindings, DeferredContract, RawCall, RawContract};
pub use infra::{NetworkProvider, ProviderError, ProvidersRegistry};
pub use registry::{
    ContractVersions, NetworkContracts, NetworksContractsRegistry, ResolvedContract, VersionHistory,
};
pub use services::contract_factory::{ContractFactory, ContractInstance, NetworkContractFactory};
pub use services::errors::{CallError, MulticallError};
pub use services::multicall::{BatchOutput, CallBatch, MulticallContext};
