pub mod contracts;
pub mod signing;

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder, WsConnect};
use alloy_signer_local::PrivateKeySigner;
use signing::private_key_signer;
use std::str::FromStr;

use crate::{credential::Credential, error::EvmClientError};

#[derive(Clone)]
pub struct EvmQueryClient {
    pub endpoint: EvmEndpoint,
    pub provider: DynProvider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvmEndpoint {
    WebSocket(reqwest::Url),
    Http(reqwest::Url),
}

impl FromStr for EvmEndpoint {
    type Err = EvmClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url =
            reqwest::Url::parse(s).map_err(|e| EvmClientError::ParseEndpoint(e.to_string()))?;
        match url.scheme() {
            "ws" | "wss" => Ok(EvmEndpoint::WebSocket(url)),
            "http" | "https" => Ok(EvmEndpoint::Http(url)),
            scheme => Err(EvmClientError::ParseEndpoint(format!(
                "could not determine endpoint from scheme {scheme} (full url: {s})"
            ))),
        }
    }
}

impl std::fmt::Display for EvmEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvmEndpoint::WebSocket(url) => write!(f, "{}", url),
            EvmEndpoint::Http(url) => write!(f, "{}", url),
        }
    }
}

impl EvmEndpoint {
    pub async fn to_provider(&self) -> Result<DynProvider, EvmClientError> {
        Ok(match self {
            EvmEndpoint::WebSocket(url) => {
                let ws = WsConnect::new(url.clone());
                DynProvider::new(
                    ProviderBuilder::new()
                        .connect_ws(ws)
                        .await
                        .map_err(|e| EvmClientError::WebSocketProvider(e.into()))?,
                )
            }
            EvmEndpoint::Http(url) => {
                DynProvider::new(ProviderBuilder::new().connect_http(url.clone()))
            }
        })
    }
}

impl EvmQueryClient {
    pub async fn new(endpoint: EvmEndpoint) -> Result<Self, EvmClientError> {
        Ok(EvmQueryClient {
            provider: endpoint.to_provider().await?,
            endpoint,
        })
    }

    pub async fn chain_id(&self) -> Result<u64, EvmClientError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| EvmClientError::ChainId(e.into()))
    }
}

impl std::fmt::Debug for EvmQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmQueryClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// A provider that signs with the owner key, plus the key itself for callers
/// that build and sign their own envelopes
#[derive(Clone)]
pub struct EvmSigningClient {
    pub endpoint: EvmEndpoint,
    /// Fills and signs anything sent through `send_transaction`,
    /// pre-signed envelopes go out untouched
    pub provider: DynProvider,
    pub signer: PrivateKeySigner,
}

impl EvmSigningClient {
    /// The key is parsed before any connection is attempted
    pub async fn new(
        endpoint: EvmEndpoint,
        credential: &Credential,
    ) -> Result<Self, EvmClientError> {
        let signer = private_key_signer(credential)?;

        let builder = ProviderBuilder::new().wallet(EthereumWallet::from(signer.clone()));

        let provider = match &endpoint {
            EvmEndpoint::WebSocket(url) => DynProvider::new(
                builder
                    .connect_ws(WsConnect::new(url.clone()))
                    .await
                    .map_err(|e| EvmClientError::WebSocketProvider(e.into()))?,
            ),
            EvmEndpoint::Http(url) => DynProvider::new(builder.connect_http(url.clone())),
        };

        Ok(Self {
            endpoint,
            provider,
            signer,
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub async fn chain_id(&self) -> Result<u64, EvmClientError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| EvmClientError::ChainId(e.into()))
    }
}

impl std::fmt::Debug for EvmSigningClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmSigningClient")
            .field("endpoint", &self.endpoint)
            .field("address", &self.address())
            .finish()
    }
}
