use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use utils::{config::ConfigExt, logging::LoggingConfig};

use crate::registrar::RegistrarConfig;

/// The fully loaded config, built up by `ConfigBuilder` from (in order of preference):
///
/// 1. cli args
/// 2. environment variables
/// 3. config file
/// 4. the defaults below
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default is `info`
    pub log_level: String,
    /// Default is `text`
    pub log_format: String,
    /// Default is empty
    pub log_tags: String,
    /// Default is the mev-commit testnet
    pub rpc_endpoint: String,
    pub registry_address: Address,
    /// Relative paths are resolved against the working directory
    pub events_file: PathBuf,
    /// Default is `300000`
    pub fallback_gas_limit: u64,
    pub receipt_poll_interval_ms: u64,
    pub submission_delay_ms: u64,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            log_tags: String::new(),
            rpc_endpoint: "https://chainrpc.testnet.mev-commit.xyz/".to_string(),
            registry_address: address!("1C2a592950E5dAd49c0E2F3A402DCF496bdf7b67"),
            events_file: PathBuf::from("provider_registered_events.json"),
            fallback_gas_limit: RegistrarConfig::DEFAULT_FALLBACK_GAS_LIMIT,
            receipt_poll_interval_ms: 1000,
            submission_delay_ms: 1000,
            dry_run: false,
        }
    }
}

impl ConfigExt for Config {
    const FILENAME: &'static str = "providers-register.toml";

    fn with_paths(&mut self, f: fn(&mut PathBuf)) {
        f(&mut self.events_file);
    }

    fn logging(&self) -> LoggingConfig {
        LoggingConfig::new(&self.log_level, &self.log_format, &self.log_tags)
    }
}

impl Config {
    pub fn registrar_config(&self) -> RegistrarConfig {
        RegistrarConfig {
            registry_address: self.registry_address,
            fallback_gas_limit: self.fallback_gas_limit,
            receipt_poll_interval: Duration::from_millis(self.receipt_poll_interval_ms),
            submission_delay: Duration::from_millis(self.submission_delay_ms),
            dry_run: self.dry_run,
        }
    }
}
