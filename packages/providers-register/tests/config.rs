use std::{path::PathBuf, time::Duration};

use alloy_primitives::address;
use providers_register::{args::CliArgs, config::Config, registrar::RegistrarConfig};
use utils::{
    config::{CliEnvExt, ConfigBuilder, ConfigExt},
    logging::LoggingConfig,
};

const ENV_VARS: [&str; 5] = [
    "PROVIDERS_REGISTER_HOME",
    "PROVIDERS_REGISTER_REGISTRY_ADDRESS",
    "PROVIDERS_REGISTER_FALLBACK_GAS_LIMIT",
    "PROVIDERS_REGISTER_LOG_FORMAT",
    "PROVIDERS_REGISTER_DRY_RUN",
];

fn build(args: CliArgs) -> Config {
    ConfigBuilder::new(args).build().unwrap()
}

fn args_in(dir: &tempfile::TempDir) -> CliArgs {
    CliArgs {
        home: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn config_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = temp_env::with_vars_unset(ENV_VARS, || build(args_in(&dir)));

    assert_eq!(config, Config::default());
    assert_eq!(
        config.rpc_endpoint,
        "https://chainrpc.testnet.mev-commit.xyz/"
    );
    assert_eq!(
        config.registry_address,
        address!("1C2a592950E5dAd49c0E2F3A402DCF496bdf7b67")
    );
    assert_eq!(
        config.events_file,
        PathBuf::from("provider_registered_events.json")
    );
    assert_eq!(config.logging(), LoggingConfig::new("info", "text", ""));

    assert_eq!(
        config.registrar_config(),
        RegistrarConfig {
            fallback_gas_limit: 300_000,
            receipt_poll_interval: Duration::from_secs(1),
            submission_delay: Duration::from_secs(1),
            dry_run: false,
            ..RegistrarConfig::new(config.registry_address)
        }
    );
}

#[test]
fn config_file_env_and_cli() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(Config::FILENAME),
        r#"
[default]
log_format = "json"

[providers_register]
fallback_gas_limit = 500000
events_file = "~/events.json"
log_tags = "service:providers-register"
"#,
    )
    .unwrap();

    let config = temp_env::with_vars_unset(ENV_VARS, || build(args_in(&dir)));
    assert_eq!(config.fallback_gas_limit, 500_000);
    assert_eq!(config.log_format, "json");
    assert_eq!(config.log_tags, "service:providers-register");
    assert!(config.events_file.ends_with("events.json"));
    assert!(!config.events_file.starts_with("~"));

    temp_env::with_vars(
        [
            (
                format!("{}_REGISTRY_ADDRESS", CliArgs::ENV_VAR_PREFIX),
                Some("0x000000000000000000000000000000000000bEEF"),
            ),
            (
                format!("{}_FALLBACK_GAS_LIMIT", CliArgs::ENV_VAR_PREFIX),
                Some("600000"),
            ),
            (
                format!("{}_DRY_RUN", CliArgs::ENV_VAR_PREFIX),
                Some("true"),
            ),
        ],
        || {
            let config = build(args_in(&dir));
            assert_eq!(
                config.registry_address,
                address!("000000000000000000000000000000000000bEEF")
            );
            assert_eq!(config.fallback_gas_limit, 600_000);
            assert!(config.dry_run);

            let config = build(CliArgs {
                fallback_gas_limit: Some(700_000),
                log_format: Some("text".to_string()),
                ..args_in(&dir)
            });
            assert_eq!(config.fallback_gas_limit, 700_000);
            assert_eq!(config.log_format, "text");
        },
    );
}
