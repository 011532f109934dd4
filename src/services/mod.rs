pub mod contract_factory;
pub mod errors;
pub mod multicall;
