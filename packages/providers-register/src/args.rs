use alloy_primitives::Address;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utils::config::CliEnvExt;

/// This struct is used for both args and environment variables
/// every env var can be overriden by a cli arg, and both override the config file
/// env vars follow the pattern of PROVIDERS_REGISTER_{UPPERCASE_ARG_NAME}
///
/// The signing key is never taken from here, it's always read from OWNER_PRIVATE_KEY
#[derive(Debug, Parser, Serialize, Deserialize, Default)]
#[command(version, about, long_about = None)]
#[serde(default)]
pub struct CliArgs {
    /// The directory holding providers-register.toml
    /// if not provided here or in an env var, a series of default directories will be tried
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<PathBuf>,

    /// The path to an optional dotenv file to try and load
    /// if not set, will be the current working directory's .env
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dotenv: Option<PathBuf>,

    /// One of trace, debug, info, warn, error
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// json or text
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,

    /// Comma-separated name:value pairs added to every log line
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_tags: Option<String>,

    /// JSON-RPC endpoint of the mev-commit chain (http(s) or ws(s))
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_endpoint: Option<String>,

    /// The provider registry receiving the registrations
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_address: Option<Address>,

    /// JSON array of captured ProviderRegistered events
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    /// Gas limit used when estimation fails
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_gas_limit: Option<u64>,

    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_poll_interval_ms: Option<u64>,

    /// Pause after each confirmed registration
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_delay_ms: Option<u64>,

    /// Sign every transaction but don't send any
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl CliEnvExt for CliArgs {
    const ENV_VAR_PREFIX: &'static str = "PROVIDERS_REGISTER";
    const TOML_IDENTIFIER: &'static str = "providers_register";

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn dotenv_path(&self) -> Option<PathBuf> {
        self.dotenv.clone()
    }
}
