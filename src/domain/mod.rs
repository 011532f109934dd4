pub mod contract;
pub mod errors;
pub mod network;

pub use contract::*;
pub use errors::*;
pub use network::*;
