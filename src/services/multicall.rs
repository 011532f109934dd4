use std::any::type_name;
use std::time::Instant;

use alloy::network::Network;
use alloy::primitives::{Address, Bytes};
use alloy::providers::bindings::IMulticall3;
use alloy::providers::{CallItem, CallTuple, DynProvider, Dynamic, Empty, MulticallBuilder, Provider};
use alloy::sol_types::SolCall;

use crate::domain::{NetworkId, RegistryError};
use crate::evm::{RawCall, RawContract};
use crate::registry::NetworkContracts;
use crate::services::errors::{MulticallError, SlotError};

/// Ordered call items sent as one aggregate call.
pub trait CallBatch {
    type Calls: CallTuple;

    fn len(&self) -> usize;

    fn into_builder<P: Provider<N>, N: Network>(
        self,
        builder: MulticallBuilder<Empty, P, N>,
    ) -> MulticallBuilder<Self::Calls, P, N>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D: SolCall + 'static> CallBatch for Vec<CallItem<D>> {
    type Calls = Dynamic<D>;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn into_builder<P: Provider<N>, N: Network>(
        self,
        builder: MulticallBuilder<Empty, P, N>,
    ) -> MulticallBuilder<Self::Calls, P, N> {
        builder.dynamic().extend_calls(self)
    }
}

macro_rules! impl_call_batch {
    ($($ty:ident : $idx:tt),+) => {
        impl<$($ty: SolCall + 'static),+> CallBatch for ($(CallItem<$ty>,)+) {
            type Calls = ($($ty,)+);

            fn len(&self) -> usize {
                [$($idx),+].len()
            }

            fn into_builder<P: Provider<N>, N: Network>(
                self,
                builder: MulticallBuilder<Empty, P, N>,
            ) -> MulticallBuilder<Self::Calls, P, N> {
                builder$(.add_call(self.$idx))+
            }
        }
    };
}

impl_call_batch!(D0: 0);
impl_call_batch!(D0: 0, D1: 1);
impl_call_batch!(D0: 0, D1: 1, D2: 2);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9, D10: 10);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9, D10: 10, D11: 11);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9, D10: 10, D11: 11, D12: 12);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9, D10: 10, D11: 11, D12: 12, D13: 13);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9, D10: 10, D11: 11, D12: 12, D13: 13, D14: 14);
impl_call_batch!(D0: 0, D1: 1, D2: 2, D3: 3, D4: 4, D5: 5, D6: 6, D7: 7, D8: 8, D9: 9, D10: 10, D11: 11, D12: 12, D13: 13, D14: 14, D15: 15);

pub type BatchOutput<B> = <<B as CallBatch>::Calls as CallTuple>::SuccessReturns;

pub struct MulticallContext<'a> {
    contracts: &'a NetworkContracts,
}

impl<'a> MulticallContext<'a> {
    pub(crate) fn new(contracts: &'a NetworkContracts) -> Self {
        Self { contracts }
    }

    /// `D` must be the deferred type `name` was registered with.
    pub fn get<D: 'static>(&self, name: &str) -> Result<D, RegistryError> {
        let deferred = self
            .contracts
            .history(name)?
            .latest_deferred()
            .map_err(RegistryError::not_found(name))?;

        deferred
            .downcast::<D>()
            .map(|deferred| *deferred)
            .map_err(|_| {
                tracing::debug!(contract = name, expected = type_name::<D>(), "deferred handle type mismatch");
                RegistryError::BindingsMismatch(name.to_string())
            })
    }
}

fn aggregate_failed(network: &NetworkId, reason: impl ToString) -> MulticallError {
    let reason = reason.to_string();
    tracing::error!(%network, error = %reason, "aggregate call failed");
    MulticallError::AggregateCallFailed {
        network: network.clone(),
        reason,
    }
}

pub async fn aggregate<B: CallBatch>(
    connection: &DynProvider,
    aggregator: Address,
    network: &NetworkId,
    batch: B,
) -> Result<BatchOutput<B>, MulticallError> {
    if batch.is_empty() {
        return Err(MulticallError::EmptyBatch);
    }

    let calls = batch.len();
    let multicall = batch.into_builder(connection.multicall().address(aggregator));
    let t0 = Instant::now();

    let results = multicall
        .aggregate3()
        .await
        .and_then(<B::Calls as CallTuple>::try_into_success)
        .map_err(|err| aggregate_failed(network, err))?;

    tracing::info!(%network, calls, time = t0.elapsed().as_millis(), "aggregate call complete");

    Ok(results)
}

pub async fn aggregate_raw(
    connection: &DynProvider,
    aggregator: Address,
    network: &NetworkId,
    calls: Vec<RawCall>,
) -> Result<Vec<Bytes>, MulticallError> {
    if calls.is_empty() {
        return Err(MulticallError::EmptyBatch);
    }

    let expected = calls.len();
    let calls = calls
        .into_iter()
        .map(|call| IMulticall3::Call3 {
            target: call.target,
            allowFailure: false,
            callData: call.call_data,
        })
        .collect();

    let t0 = Instant::now();
    let results = RawContract::new(aggregator, connection.clone())
        .call_sol(IMulticall3::aggregate3Call { calls })
        .await
        .map_err(|err| aggregate_failed(network, err))?;

    let returns = collect_returns(expected, results).map_err(|err| aggregate_failed(network, err))?;

    tracing::info!(%network, calls = expected, time = t0.elapsed().as_millis(), "aggregate call complete");

    Ok(returns)
}

fn collect_returns(expected: usize, results: Vec<IMulticall3::Result>) -> Result<Vec<Bytes>, SlotError> {
    if results.len() != expected {
        return Err(SlotError::Count {
            expected,
            actual: results.len(),
        });
    }

    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result.success {
            true => Ok(result.returnData),
            false => Err(SlotError::Failed(index)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evm::DeferredContract;
    use alloy::primitives::U256;
    use alloy::providers::ProviderBuilder;
    use alloy::sol;
    use alloy::transports::mock::Asserter;

    sol! {
        contract Token {
            function balanceOf(address owner) external view returns (uint256);
            function decimals() external view returns (uint8);
            function symbol() external view returns (string);
        }
    }

    fn mocked(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    fn network() -> NetworkId {
        NetworkId::from(250u64)
    }

    fn token() -> DeferredContract {
        DeferredContract::new(Address::repeat_byte(1))
    }

    fn response(slots: Vec<(bool, Vec<u8>)>) -> Bytes {
        let results: Vec<IMulticall3::Result> = slots
            .into_iter()
            .map(|(success, data)| IMulticall3::Result {
                success,
                returnData: data.into(),
            })
            .collect();
        IMulticall3::aggregate3Call::abi_encode_returns(&results).into()
    }

    fn tuple_batch() -> (
        CallItem<Token::balanceOfCall>,
        CallItem<Token::decimalsCall>,
        CallItem<Token::symbolCall>,
    ) {
        let token = token();
        (
            token.call(Token::balanceOfCall { owner: Address::ZERO }),
            token.call(Token::decimalsCall {}),
            token.call(Token::symbolCall {}),
        )
    }

    fn tuple_slots() -> Vec<(bool, Vec<u8>)> {
        vec![
            (true, Token::balanceOfCall::abi_encode_returns(&U256::from(7))),
            (true, Token::decimalsCall::abi_encode_returns(&18u8)),
            (true, Token::symbolCall::abi_encode_returns(&"TKN".to_string())),
        ]
    }

    #[tokio::test]
    async fn tuple_batch_keeps_order_and_types() {
        let asserter = Asserter::new();
        asserter.push_success(&response(tuple_slots()));

        let batch = tuple_batch();
        assert_eq!(batch.len(), 3);

        let (balance, decimals, symbol) =
            aggregate(&mocked(&asserter), Address::repeat_byte(0xca), &network(), batch)
                .await
                .unwrap();
        assert_eq!(balance, U256::from(7));
        assert_eq!(decimals, 18);
        assert_eq!(symbol, "TKN");
    }

    #[tokio::test]
    async fn vec_batch_output_matches_input_positions() {
        let asserter = Asserter::new();
        let slots = (0..20u64)
            .map(|i| (true, Token::balanceOfCall::abi_encode_returns(&U256::from(i * 10))))
            .collect();
        asserter.push_success(&response(slots));

        let batch: Vec<CallItem<Token::balanceOfCall>> = (0..20u8)
            .map(|i| token().call(Token::balanceOfCall { owner: Address::repeat_byte(i) }))
            .collect();

        let balances = aggregate(&mocked(&asserter), Address::repeat_byte(0xca), &network(), batch)
            .await
            .unwrap();
        assert_eq!(balances.len(), 20);
        for (i, balance) in balances.iter().enumerate() {
            assert_eq!(*balance, U256::from(i as u64 * 10));
        }
    }

    #[tokio::test]
    async fn failed_slot_fails_the_batch() {
        let asserter = Asserter::new();
        let mut slots = tuple_slots();
        slots[1].0 = false;
        asserter.push_success(&response(slots));

        let err = aggregate(&mocked(&asserter), Address::repeat_byte(0xca), &network(), tuple_batch())
            .await
            .unwrap_err();
        assert!(matches!(err, MulticallError::AggregateCallFailed { network, .. } if network == NetworkId::from(250u64)));
    }

    #[tokio::test]
    async fn undecodable_slot_fails_the_batch() {
        let asserter = Asserter::new();
        asserter.push_success(&response(vec![(true, vec![0xff])]));

        let batch = vec![token().call(Token::balanceOfCall { owner: Address::ZERO })];
        let err = aggregate(&mocked(&asserter), Address::repeat_byte(0xca), &network(), batch)
            .await
            .unwrap_err();
        assert!(matches!(err, MulticallError::AggregateCallFailed { .. }));
    }

    #[tokio::test]
    async fn transport_failure_fails_the_batch() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("execution reverted: Multicall3: call failed");

        let err = aggregate(&mocked(&asserter), Address::repeat_byte(0xca), &network(), tuple_batch())
            .await
            .unwrap_err();
        assert!(matches!(err, MulticallError::AggregateCallFailed { .. }));
        assert!(!err.is_config_error());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_sending() {
        let asserter = Asserter::new();
        let batch: Vec<CallItem<Token::decimalsCall>> = Vec::new();

        let err = aggregate(&mocked(&asserter), Address::repeat_byte(0xca), &network(), batch)
            .await
            .unwrap_err();
        assert_eq!(err, MulticallError::EmptyBatch);

        let err = aggregate_raw(&mocked(&asserter), Address::repeat_byte(0xca), &network(), Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err, MulticallError::EmptyBatch);
    }

    #[tokio::test]
    async fn raw_calls_return_bytes_in_order() {
        let asserter = Asserter::new();
        asserter.push_success(&response(vec![(true, vec![0xaa]), (true, vec![0xbb])]));

        let calls = vec![token().raw(vec![1u8]), token().raw(vec![2u8])];
        let returns = aggregate_raw(&mocked(&asserter), Address::repeat_byte(0xca), &network(), calls)
            .await
            .unwrap();
        assert_eq!(returns, vec![Bytes::from(vec![0xaa]), Bytes::from(vec![0xbb])]);
    }

    #[test]
    fn raw_slots_are_all_or_nothing() {
        let ok = |data: u8| IMulticall3::Result {
            success: true,
            returnData: Bytes::from(vec![data]),
        };
        let mut failed = ok(2);
        failed.success = false;

        assert_eq!(collect_returns(2, vec![ok(1), failed]).unwrap_err(), SlotError::Failed(1));
        assert_eq!(
            collect_returns(3, vec![ok(1)]).unwrap_err(),
            SlotError::Count { expected: 3, actual: 1 }
        );
    }
}
