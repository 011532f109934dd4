pub mod errors;
pub mod providers;

pub use errors::ProviderError;
pub use providers::{NetworkProvider, ProvidersRegistry};
