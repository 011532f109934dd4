use alloy::eips::BlockId;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use crate::services::errors::CallError;

#[derive(Clone)]
pub struct RawContract {
    address: Address,
    connection: DynProvider,
}

impl RawContract {
    pub fn new(address: Address, connection: DynProvider) -> Self {
        Self {
            address,
            connection,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn connection(&self) -> &DynProvider {
        &self.connection
    }

    pub async fn call(&self, call_data: Bytes) -> Result<Bytes, CallError> {
        self.call_at(call_data, BlockId::latest()).await
    }

    pub async fn call_at(&self, call_data: Bytes, block: BlockId) -> Result<Bytes, CallError> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(call_data);

        self.connection
            .call(tx)
            .block(block)
            .await
            .map_err(|err| CallError::Transport(self.address, err.to_string()))
    }

    pub async fn call_sol<C: SolCall>(&self, call: C) -> Result<C::Return, CallError> {
        let data = self.call(call.abi_encode().into()).await?;
        C::abi_decode_returns(&data).map_err(|err| CallError::Decode(self.address, err.to_string()))
    }
}

impl std::fmt::Debug for RawContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawContract").field("address", &self.address).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use alloy::providers::ProviderBuilder;
    use alloy::sol;
    use alloy::transports::mock::Asserter;

    sol! {
        contract Token {
            function totalSupply() external view returns (uint256);
        }
    }

    fn mocked(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    #[tokio::test]
    async fn call_sol_decodes_return_data() {
        let asserter = Asserter::new();
        let contract = RawContract::new(Address::repeat_byte(7), mocked(&asserter));
        let encoded: Bytes = Token::totalSupplyCall::abi_encode_returns(&U256::from(1000)).into();
        asserter.push_success(&encoded);

        let supply = contract.call_sol(Token::totalSupplyCall {}).await.unwrap();
        assert_eq!(supply, U256::from(1000));
    }

    #[tokio::test]
    async fn transport_errors_are_reported_with_the_address() {
        let asserter = Asserter::new();
        let contract = RawContract::new(Address::repeat_byte(7), mocked(&asserter));
        asserter.push_failure_msg("execution reverted");

        let err = contract.call(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, CallError::Transport(address, _) if address == Address::repeat_byte(7)));
    }
}
