use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, TxHash};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use std::time::Duration;

use crate::{
    chain::{MinedReceipt, RegistrationChain},
    error::RegisterError,
    events::ProviderRegisteredEvent,
    solidity_types::delegate_register_and_stake,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarConfig {
    pub registry_address: Address,
    /// Used as-is whenever estimation fails
    pub fallback_gas_limit: u64,
    pub receipt_poll_interval: Duration,
    pub submission_delay: Duration,
    pub dry_run: bool,
}

impl RegistrarConfig {
    pub const DEFAULT_FALLBACK_GAS_LIMIT: u64 = 300_000;

    pub fn new(registry_address: Address) -> Self {
        Self {
            registry_address,
            fallback_gas_limit: Self::DEFAULT_FALLBACK_GAS_LIMIT,
            receipt_poll_interval: Duration::from_secs(1),
            submission_delay: Duration::from_secs(1),
            dry_run: false,
        }
    }
}

/// What happened to one record. In a dry run the hash is that of the signed,
/// unsent transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub provider: Address,
    pub transaction_hash: TxHash,
    pub nonce: u64,
    pub gas_limit: u64,
    pub used_fallback_gas: bool,
}

// fetched once per run
#[derive(Debug, Clone, Copy)]
struct TxParams {
    gas_price: u128,
    chain_id: u64,
}

pub struct Registrar<C> {
    chain: C,
    wallet: EthereumWallet,
    owner: Address,
    config: RegistrarConfig,
}

impl<C: RegistrationChain> Registrar<C> {
    pub fn new(chain: C, signer: PrivateKeySigner, config: RegistrarConfig) -> Self {
        Self {
            owner: signer.address(),
            wallet: signer.into(),
            chain,
            config,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Registers every provider in order, one transaction at a time.
    /// The first error stops the run, records after it are not touched.
    pub async fn run(
        &self,
        events: &[ProviderRegisteredEvent],
    ) -> Result<Vec<RegistrationOutcome>, RegisterError> {
        let mut nonce = self
            .chain
            .pending_nonce(self.owner)
            .await
            .map_err(RegisterError::Nonce)?;

        let params = TxParams {
            gas_price: self
                .chain
                .gas_price()
                .await
                .map_err(RegisterError::GasPrice)?,
            chain_id: self
                .chain
                .chain_id()
                .await
                .map_err(RegisterError::ChainId)?,
        };

        tracing::info!(
            "Registering {} providers at {} from {} (chain id {}, starting nonce {}, gas price {})",
            events.len(),
            self.config.registry_address,
            self.owner,
            params.chain_id,
            nonce,
            params.gas_price
        );

        let mut outcomes = Vec::with_capacity(events.len());

        for event in events {
            let outcome = self.register(event, nonce, params).await?;
            outcomes.push(outcome);

            nonce += 1;

            tokio::time::sleep(self.config.submission_delay).await;
        }

        Ok(outcomes)
    }

    async fn register(
        &self,
        event: &ProviderRegisteredEvent,
        nonce: u64,
        params: TxParams,
    ) -> Result<RegistrationOutcome, RegisterError> {
        tracing::info!("Registering provider: {}", event.provider);

        let bls_public_key = event.bls_public_key()?;

        let request = TransactionRequest::default()
            .with_from(self.owner)
            .with_to(self.config.registry_address)
            .with_value(event.current_balance)
            .with_input(delegate_register_and_stake(event.provider, bls_public_key))
            .with_gas_price(params.gas_price);

        let (gas_limit, used_fallback_gas) = match self.chain.estimate_gas(&request).await {
            Ok(gas_limit) => (gas_limit, false),
            Err(e) => {
                tracing::warn!(
                    "Failed to estimate gas limit, using default {}: {:#}",
                    self.config.fallback_gas_limit,
                    e
                );
                (self.config.fallback_gas_limit, true)
            }
        };

        let envelope = request
            .with_nonce(nonce)
            .with_gas_limit(gas_limit)
            .with_chain_id(params.chain_id)
            .build(&self.wallet)
            .await
            .map_err(|e| RegisterError::Sign(e.to_string()))?;

        let transaction_hash = *envelope.tx_hash();

        let outcome = RegistrationOutcome {
            provider: event.provider,
            transaction_hash,
            nonce,
            gas_limit,
            used_fallback_gas,
        };

        if self.config.dry_run {
            tracing::info!(
                "Dry run, not sending {} (nonce {}, gas limit {}, value {})",
                transaction_hash,
                nonce,
                gas_limit,
                event.current_balance
            );
            return Ok(outcome);
        }

        self.chain
            .send_transaction(envelope)
            .await
            .map_err(RegisterError::Send)?;

        tracing::info!("Transaction sent: {}", transaction_hash);

        let receipt = self.wait_for_receipt(transaction_hash).await?;

        if !receipt.success {
            return Err(RegisterError::TransactionFailed(transaction_hash));
        }

        tracing::info!(
            "Provider {} successfully registered in block {:?} (gas used {})",
            event.provider,
            receipt.block_number,
            receipt.gas_used
        );

        Ok(outcome)
    }

    // no deadline, only "not found yet" is retried
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<MinedReceipt, RegisterError> {
        loop {
            match self.chain.transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => {
                    tracing::debug!("Receipt for {} not found yet", tx_hash);
                    tokio::time::sleep(self.config.receipt_poll_interval).await;
                }
                Err(reason) => return Err(RegisterError::Receipt { tx_hash, reason }),
            }
        }
    }
}
