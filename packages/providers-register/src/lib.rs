//! Replays captured `ProviderRegistered` events against a new provider registry,
//! one funded `delegateRegisterAndStake` transaction per provider, strictly in order.

pub mod args;
pub mod chain;
pub mod config;
pub mod error;
pub mod events;
pub mod registrar;
pub mod solidity_types;

/// The signing key is only ever read from here
pub const OWNER_PRIVATE_KEY_ENV: &str = "OWNER_PRIVATE_KEY";
