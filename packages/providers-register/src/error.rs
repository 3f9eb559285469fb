use alloy_primitives::{Address, TxHash};
use std::path::PathBuf;
use thiserror::Error;
use utils::error::EvmClientError;

/// Every variant halts the run, nothing is retried
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("{0} environment variable not set")]
    MissingPrivateKey(&'static str),

    #[error("failed to load private key: {0}")]
    PrivateKey(#[source] EvmClientError),

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: EvmClientError,
    },

    #[error("failed to read {}: {source}", path.display())]
    ReadEvents {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ParseEvents {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode BLS public key of provider {provider}: {source}")]
    BlsPublicKey {
        provider: Address,
        #[source]
        source: const_hex::FromHexError,
    },

    #[error("failed to get nonce: {0:#}")]
    Nonce(anyhow::Error),

    #[error("failed to suggest gas price: {0:#}")]
    GasPrice(anyhow::Error),

    #[error("failed to get chain id: {0:#}")]
    ChainId(anyhow::Error),

    #[error("failed to sign transaction: {0}")]
    Sign(String),

    #[error("failed to send transaction: {0:#}")]
    Send(anyhow::Error),

    #[error("failed to get transaction receipt for {tx_hash}: {reason:#}")]
    Receipt {
        tx_hash: TxHash,
        reason: anyhow::Error,
    },

    #[error("transaction failed: {0}")]
    TransactionFailed(TxHash),
}
