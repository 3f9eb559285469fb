//! Bindings for the mev-commit contracts this workspace talks to.
//!
//! The ABI JSON under `src/contracts/abi` is the only source of truth: the typed
//! bindings are generated from it at compile time by `sol!`, and the dynamic
//! [`AbiContract`] adapter reads the very same files at runtime.

mod abi;
mod contract;
mod error;
mod solidity_types;

pub use abi::*;
pub use contract::*;
pub use error::*;
pub use solidity_types::*;
