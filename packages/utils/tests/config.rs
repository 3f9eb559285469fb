use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use utils::{
    config::{CliEnvExt, ConfigBuilder, ConfigExt, ConfigFilePath},
    logging::LoggingConfig,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TestArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    home: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dotenv: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<u64>,
}

impl CliEnvExt for TestArgs {
    const ENV_VAR_PREFIX: &'static str = "UTILS_CONFIG_TEST";
    const TOML_IDENTIFIER: &'static str = "test_app";

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn dotenv_path(&self) -> Option<PathBuf> {
        self.dotenv.clone()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct TestConfig {
    log_level: String,
    data: PathBuf,
    gas: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data: PathBuf::from("~/data"),
            gas: 100,
        }
    }
}

impl ConfigExt for TestConfig {
    const FILENAME: &'static str = "utils-config-test.toml";

    fn with_paths(&mut self, f: fn(&mut PathBuf)) {
        f(&mut self.data);
    }

    fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            ..Default::default()
        }
    }
}

const TOML: &str = r#"
[default]
log_level = "warn"
gas = 200

[test_app]
gas = 300
"#;

const ENV_VARS: [&str; 3] = [
    "UTILS_CONFIG_TEST_HOME",
    "UTILS_CONFIG_TEST_GAS",
    "UTILS_CONFIG_TEST_LOG_LEVEL",
];

fn build(args: TestArgs) -> TestConfig {
    ConfigBuilder::<TestConfig, TestArgs>::new(args)
        .build()
        .unwrap()
}

#[test]
fn config_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();

    let config = temp_env::with_vars_unset(ENV_VARS, || {
        build(TestArgs {
            home: Some(dir.path().to_path_buf()),
            ..Default::default()
        })
    });

    assert_eq!(config.gas, 100);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.logging(), LoggingConfig::default());

    // tilde is expanded after loading
    assert!(!config.data.to_string_lossy().starts_with('~'));
    assert!(config.data.ends_with("data"));
}

#[test]
fn config_layering() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(TestConfig::FILENAME), TOML).unwrap();

    let home = || Some(dir.path().to_path_buf());

    // file: the section overrides the default table
    let config = temp_env::with_vars_unset(ENV_VARS, || {
        build(TestArgs {
            home: home(),
            ..Default::default()
        })
    });
    assert_eq!(config.gas, 300);
    assert_eq!(config.log_level, "warn");

    // env overrides file
    temp_env::with_vars(
        [
            ("UTILS_CONFIG_TEST_GAS", Some("400")),
            ("UTILS_CONFIG_TEST_LOG_LEVEL", Some("debug")),
        ],
        || {
            let config = build(TestArgs {
                home: home(),
                ..Default::default()
            });
            assert_eq!(config.gas, 400);
            assert_eq!(config.log_level, "debug");

            // cli overrides env
            let config = build(TestArgs {
                home: home(),
                gas: Some(500),
                ..Default::default()
            });
            assert_eq!(config.gas, 500);
            assert_eq!(config.log_level, "debug");
        },
    );
}

#[test]
fn config_home_from_env() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(TestConfig::FILENAME), TOML).unwrap();

    temp_env::with_var(
        "UTILS_CONFIG_TEST_HOME",
        Some(dir.path().to_string_lossy().to_string()),
        || {
            assert_eq!(build(TestArgs::default()).gas, 300);
        },
    );
}

#[test]
fn config_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    let dotenv = dir.path().join("test.env");
    std::fs::write(&dotenv, "UTILS_CONFIG_TEST_DOTENV_GAS=600\n").unwrap();

    temp_env::with_var_unset("UTILS_CONFIG_TEST_DOTENV_GAS", || {
        build(TestArgs {
            home: Some(dir.path().to_path_buf()),
            dotenv: Some(dotenv.clone()),
            ..Default::default()
        });

        assert_eq!(
            std::env::var("UTILS_CONFIG_TEST_DOTENV_GAS").unwrap(),
            "600"
        );
    });
}

// only checks the user overrides come first, the rest depends on the platform
#[test]
fn config_filepath() {
    let filepaths =
        |home: Option<PathBuf>| ConfigFilePath::new(TestConfig::FILENAME, home).into_possible();

    assert_eq!(
        filepaths(Some("/tmp1".into())).first().unwrap(),
        &PathBuf::from("/tmp1").join(TestConfig::FILENAME)
    );

    temp_env::with_var("MEV_COMMIT_HOME", Some("/tmp2"), || {
        let paths = filepaths(Some("/tmp1".into()));
        assert_eq!(paths[0], PathBuf::from("/tmp1").join(TestConfig::FILENAME));
        assert_eq!(paths[1], PathBuf::from("/tmp2").join(TestConfig::FILENAME));

        assert_eq!(
            filepaths(None).first().unwrap(),
            &PathBuf::from("/tmp2").join(TestConfig::FILENAME)
        );
    });

    assert_eq!(
        filepaths(None).last().unwrap(),
        &PathBuf::from("/etc/mev-commit").join(TestConfig::FILENAME)
    );
}
