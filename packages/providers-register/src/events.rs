use alloy_primitives::{Address, Bytes, U256};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::{path::Path, str::FromStr};

use crate::error::RegisterError;

/// One captured `ProviderRegistered` event, as exported from the old registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRegisteredEvent {
    pub provider: Address,
    #[serde(default, deserialize_with = "deserialize_u256")]
    pub staked_amount: U256,
    /// Hex, with or without `0x`
    pub bls_public_key: String,
    /// The value sent along with the registration
    #[serde(default, deserialize_with = "deserialize_u256")]
    pub current_balance: U256,
}

impl ProviderRegisteredEvent {
    pub fn bls_public_key(&self) -> Result<Bytes, RegisterError> {
        const_hex::decode(&self.bls_public_key)
            .map(Bytes::from)
            .map_err(|source| RegisterError::BlsPublicKey {
                provider: self.provider,
                source,
            })
    }
}

pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<ProviderRegisteredEvent>, RegisterError> {
    let path = path.as_ref();

    let data = std::fs::read(path).map_err(|source| RegisterError::ReadEvents {
        path: path.to_path_buf(),
        source,
    })?;

    let events: Vec<ProviderRegisteredEvent> =
        serde_json::from_slice(&data).map_err(|source| RegisterError::ParseEvents {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Loaded {} events from {}", events.len(), path.display());

    Ok(events)
}

// amounts are exported as bare JSON integers wider than u64,
// so the literal is taken as-is rather than going through f64
// quoted decimal or 0x-prefixed hex is accepted too, null counts as zero
fn deserialize_u256<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Box<RawValue>>::deserialize(deserializer)? else {
        return Ok(U256::ZERO);
    };

    let literal = raw.get();
    let text = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    U256::from_str(text)
        .map_err(|e| de::Error::custom(format!("invalid uint256 {literal}: {e}")))
}
