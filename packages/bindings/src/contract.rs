use alloy_contract::{ContractInstance, Interface};
use alloy_dyn_abi::{DynSolValue, EventExt};
use alloy_json_abi::{Event, Function};
use alloy_network::{Ethereum, Network};
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockNumberOrTag, Filter, Log};
use futures::{Stream, StreamExt};

use crate::{BindingError, KnownContract};

/// A contract bound to an address, addressed by method and event *names*
/// rather than generated types. Everything is looked up in the same embedded
/// ABI that the typed bindings are generated from.
pub struct AbiContract<P, N: Network = Ethereum> {
    contract: KnownContract,
    instance: ContractInstance<P, N>,
}

/// A log decoded against one of the contract's events
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    pub event: &'static str,
    pub address: Address,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<TxHash>,
    pub indexed: Vec<DynSolValue>,
    pub body: Vec<DynSolValue>,
}

impl<P: Provider<N>, N: Network> AbiContract<P, N> {
    pub fn new(contract: KnownContract, address: Address, provider: P) -> Self {
        Self {
            contract,
            instance: ContractInstance::new(
                address,
                provider,
                Interface::new(contract.abi().clone()),
            ),
        }
    }

    pub fn contract(&self) -> KnownContract {
        self.contract
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    pub fn function(&self, name: &str) -> Result<&'static Function, BindingError> {
        match self.contract.abi().function(name).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some([_, _, ..]) => Err(BindingError::Overloaded {
                contract: self.contract.name(),
                name: name.to_string(),
            }),
            _ => Err(BindingError::UnknownFunction {
                contract: self.contract.name(),
                name: name.to_string(),
            }),
        }
    }

    pub fn event(&self, name: &str) -> Result<&'static Event, BindingError> {
        match self.contract.abi().event(name).map(Vec::as_slice) {
            Some([event]) => Ok(event),
            Some([_, _, ..]) => Err(BindingError::Overloaded {
                contract: self.contract.name(),
                name: name.to_string(),
            }),
            _ => Err(BindingError::UnknownEvent {
                contract: self.contract.name(),
                name: name.to_string(),
            }),
        }
    }

    /// Read-only call, returning the declared outputs in order
    pub async fn call(
        &self,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, BindingError> {
        self.function(method)?;

        Ok(self.instance.function(method, args)?.call().await?)
    }

    /// Submits a transaction through the provider's own filler stack.
    /// Returns as soon as the node accepted it, waiting on the receipt is up to the caller.
    pub async fn transact(
        &self,
        method: &str,
        args: &[DynSolValue],
        value: U256,
    ) -> Result<TxHash, BindingError> {
        self.function(method)?;

        let pending = self
            .instance
            .function(method, args)?
            .value(value)
            .send()
            .await?;

        tracing::debug!(
            "Sent {}::{} in transaction {}",
            self.contract,
            method,
            pending.tx_hash()
        );

        Ok(*pending.tx_hash())
    }

    pub async fn filter_events(
        &self,
        name: &str,
        from_block: BlockNumberOrTag,
        to_block: BlockNumberOrTag,
    ) -> Result<Vec<DecodedLog>, BindingError> {
        let event = self.event(name)?;
        let filter = self
            .event_filter(event)
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.instance.provider().get_logs(&filter).await?;

        logs.iter().map(|log| decode_log(event, log)).collect()
    }

    /// Polls the node for new logs of the event, starting from the current block
    pub async fn watch_events(
        &self,
        name: &str,
    ) -> Result<impl Stream<Item = Result<DecodedLog, BindingError>>, BindingError> {
        let event = self.event(name)?;
        let filter = self.event_filter(event);

        let poller = self.instance.provider().watch_logs(&filter).await?;

        Ok(poller
            .into_stream()
            .flat_map(futures::stream::iter)
            .map(move |log| decode_log(event, &log)))
    }

    fn event_filter(&self, event: &Event) -> Filter {
        Filter::new()
            .address(self.address())
            .event_signature(event.selector())
    }
}

pub fn decode_log(event: &'static Event, log: &Log) -> Result<DecodedLog, BindingError> {
    let decoded = event.decode_log(log.data())?;

    Ok(DecodedLog {
        event: event.name.as_str(),
        address: log.address(),
        block_number: log.block_number,
        transaction_hash: log.transaction_hash,
        indexed: decoded.indexed,
        body: decoded.body,
    })
}
