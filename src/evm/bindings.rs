use std::fmt::{Debug, Formatter};

use alloy::primitives::Address;
use alloy::providers::DynProvider;

use crate::evm::deferred::DeferredContract;
use crate::evm::raw::RawContract;

pub type InstanceFactory<C> = fn(Address, DynProvider) -> C;
pub type MulticallFactory<D> = fn(Address) -> D;

/// `C` for direct calls, `D` for deferred (multicall) calls.
pub struct Bindings<C, D> {
    pub factory: InstanceFactory<C>,
    pub multicall_factory: MulticallFactory<D>,
}

impl<C, D> Bindings<C, D> {
    pub fn new(factory: InstanceFactory<C>, multicall_factory: MulticallFactory<D>) -> Self {
        Self {
            factory,
            multicall_factory,
        }
    }
}

impl<C> Bindings<C, DeferredContract> {
    pub fn with_deferred(factory: InstanceFactory<C>) -> Self {
        Self::new(factory, DeferredContract::new)
    }
}

impl Bindings<RawContract, DeferredContract> {
    pub fn raw() -> Self {
        Self::new(RawContract::new, DeferredContract::new)
    }
}

impl<C, D> Clone for Bindings<C, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, D> Copy for Bindings<C, D> {}

impl<C, D> Debug for Bindings<C, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("instance", &std::any::type_name::<C>())
            .field("deferred", &std::any::type_name::<D>())
            .finish()
    }
}
