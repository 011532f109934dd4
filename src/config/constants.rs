pub use alloy::providers::MULTICALL3_ADDRESS;

pub const DEFAULT_CONFIG_PATH: &str = "configs/networks.json";

pub const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";
