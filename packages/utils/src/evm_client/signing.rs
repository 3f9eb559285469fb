use alloy_signer_local::PrivateKeySigner;

use crate::error::EvmClientError;

/// A 32 byte hex private key, with or without `0x`
pub fn private_key_signer(private_key: &str) -> Result<PrivateKeySigner, EvmClientError> {
    let stripped = private_key.strip_prefix("0x").unwrap_or(private_key);

    let bytes =
        const_hex::decode(stripped).map_err(|e| EvmClientError::InvalidPrivateKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&bytes)
        .map_err(|e| EvmClientError::InvalidPrivateKey(e.to_string()))
}
