pub mod constants;
pub mod errors;
pub mod network_config;
