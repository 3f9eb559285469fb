use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("{contract} has no function named {name}")]
    UnknownFunction {
        contract: &'static str,
        name: String,
    },

    #[error("{contract} has no event named {name}")]
    UnknownEvent {
        contract: &'static str,
        name: String,
    },

    #[error("{contract}::{name} is overloaded, pick it by selector instead")]
    Overloaded {
        contract: &'static str,
        name: String,
    },

    #[error("Contract call: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("Rpc: {0}")]
    Rpc(#[from] alloy_transport::TransportError),

    #[error("Unable to decode log: {0}")]
    DecodeLog(#[from] alloy_dyn_abi::Error),
}
