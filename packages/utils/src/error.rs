use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvmClientError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Unable to parse endpoint: {0}")]
    ParseEndpoint(String),

    #[error("Unable to create web socket provider: {0:#?}")]
    WebSocketProvider(anyhow::Error),

    #[error("Unable to query chain id: {0:#?}")]
    ChainId(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("invalid log format: {0}")]
    InvalidFormat(String),

    #[error("invalid tag at index {0}")]
    InvalidTag(usize),

    #[error("a global logger is already installed")]
    AlreadyInstalled,
}
