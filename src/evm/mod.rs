pub mod bindings;
pub mod deferred;
pub mod raw;

pub use bindings::*;
pub use deferred::*;
pub use raw::RawContract;
