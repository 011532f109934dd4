pub mod contracts;
pub mod multicall;
pub mod networks;
