use alloy_consensus::TxEnvelope;
use alloy_primitives::{Address, TxHash};
use alloy_provider::{DynProvider, Provider};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use anyhow::Result;
use async_trait::async_trait;

/// The part of a mined receipt the migration looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

impl From<TransactionReceipt> for MinedReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        }
    }
}

/// Everything the registrar needs from the node.
/// Transactions arrive already signed, so implementations never see the key.
#[async_trait]
pub trait RegistrationChain: Send + Sync {
    /// Nonce including transactions still in the pool
    async fn pending_nonce(&self, address: Address) -> Result<u64>;

    async fn gas_price(&self) -> Result<u128>;

    async fn chain_id(&self) -> Result<u64>;

    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64>;

    async fn send_transaction(&self, envelope: TxEnvelope) -> Result<TxHash>;

    /// `None` while the transaction is not mined yet
    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<MinedReceipt>>;
}

#[derive(Clone)]
pub struct EvmRegistrationChain {
    pub provider: DynProvider,
}

impl EvmRegistrationChain {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl RegistrationChain for EvmRegistrationChain {
    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        Ok(self
            .provider
            .get_transaction_count(address)
            .pending()
            .await?)
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64> {
        Ok(self.provider.estimate_gas(request.clone()).await?)
    }

    async fn send_transaction(&self, envelope: TxEnvelope) -> Result<TxHash> {
        let pending = self.provider.send_tx_envelope(envelope).await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<MinedReceipt>> {
        Ok(self
            .provider
            .get_transaction_receipt(tx_hash)
            .await?
            .map(MinedReceipt::from))
    }
}

impl std::fmt::Debug for EvmRegistrationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmRegistrationChain").finish_non_exhaustive()
    }
}
