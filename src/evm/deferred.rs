use alloy::primitives::{Address, Bytes};
use alloy::providers::CallItem;
use alloy::sol_types::SolCall;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCall {
    pub target: Address,
    pub call_data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredContract {
    address: Address,
}

impl DeferredContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn call<C: SolCall>(&self, call: C) -> CallItem<C> {
        CallItem::new(self.address, call.abi_encode().into())
    }

    pub fn raw(&self, call_data: impl Into<Bytes>) -> RawCall {
        RawCall {
            target: self.address,
            call_data: call_data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use alloy::providers::CallInfoTrait;
    use alloy::sol;

    sol! {
        contract Token {
            function balanceOf(address owner) external view returns (uint256);
        }
    }

    #[test]
    fn typed_call_targets_the_deferred_address() {
        let token = DeferredContract::new(address!("0x00000000000000000000000000000000000000aa"));
        let owner = address!("0x00000000000000000000000000000000000000bb");
        let call3 = token.call(Token::balanceOfCall { owner }).to_call3();

        assert!(!call3.allowFailure);
        assert_eq!(call3.target, token.address());
        assert_eq!(&call3.callData[..4], &Token::balanceOfCall::SELECTOR[..]);
        assert_eq!(call3.callData, Bytes::from(Token::balanceOfCall { owner }.abi_encode()));
    }

    #[test]
    fn raw_call_keeps_call_data() {
        let raw = DeferredContract::new(Address::repeat_byte(3)).raw(vec![1u8, 2, 3]);
        assert_eq!(raw.target, Address::repeat_byte(3));
        assert_eq!(raw.call_data, Bytes::from(vec![1u8, 2, 3]));
    }
}
