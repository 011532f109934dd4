pub mod contract_versions;
pub mod network_contracts;
pub mod networks_contracts;

pub use contract_versions::{ContractVersions, ResolvedContract, VersionHistory};
pub use network_contracts::NetworkContracts;
pub use networks_contracts::NetworksContractsRegistry;
