use anyhow::{bail, Result};
use figment::{providers::Format, Figment};
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, path::PathBuf};

use crate::logging::LoggingConfig;

/// The directory name used for all the config fallbacks, e.g. `~/.config/mev-commit`
pub const CONFIG_DIRNAME: &str = "mev-commit";

/// The builder we use to build Config
#[derive(Debug)]
pub struct ConfigBuilder<CONFIG, ARG> {
    pub cli_env_args: ARG,
    _config: PhantomData<CONFIG>,
}

pub trait CliEnvExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "PROVIDERS_REGISTER"
    const ENV_VAR_PREFIX: &'static str;

    // The section identifier in the TOML file, e.g. "providers_register"
    const TOML_IDENTIFIER: &'static str;

    // whether to print debug messages during config loading
    const PRINT_DEBUG_MSGS: bool = false;

    // an optional argument to specify the home directory
    // if not supplied, config will try a series of fallbacks
    fn home_dir(&self) -> Option<PathBuf>;

    // an optional path to a dotenv file
    // if not supplied, the current working directory's .env is tried
    fn dotenv_path(&self) -> Option<PathBuf>;

    fn merge_cli_env_args(&self) -> Result<Self> {
        let env_prefix = format!("{}_", Self::ENV_VAR_PREFIX);

        let _self = Figment::new()
            .merge(figment::providers::Env::prefixed(&env_prefix))
            .merge(figment::providers::Serialized::defaults(self))
            .extract()?;

        Ok(_self)
    }

    fn env_var(name: &str) -> Option<String> {
        std::env::var(format!("{}_{name}", Self::ENV_VAR_PREFIX)).ok()
    }
}

pub trait ConfigExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "providers-register.toml"
    const FILENAME: &'static str;

    // every path-like setting, so that `~` can be expanded after loading
    fn with_paths(&mut self, f: fn(&mut PathBuf));

    fn logging(&self) -> LoggingConfig;
}

impl<CONFIG: ConfigExt, ARG: CliEnvExt> ConfigBuilder<CONFIG, ARG> {
    pub fn new(cli_env_args: ARG) -> Self {
        Self {
            cli_env_args,
            _config: PhantomData,
        }
    }

    pub fn build(self) -> Result<CONFIG> {
        // try to load dotenv first, since it may affect env vars for filepaths
        let mut dotenv_paths = Vec::new();

        if let Some(dotenv_path) = self.cli_env_args.dotenv_path() {
            dotenv_paths.push(dotenv_path);
        }

        if let Ok(dotenv_path) = std::env::var("MEV_COMMIT_DOTENV") {
            dotenv_paths.push(PathBuf::from(dotenv_path));
        }

        dotenv_paths.push(std::env::current_dir()?.join(".env"));

        for dotenv_path in dotenv_paths {
            if ARG::PRINT_DEBUG_MSGS {
                eprintln!("Loading env vars from {}", dotenv_path.display());
            }
            if dotenv_path.exists() {
                if let Err(e) = dotenvy::from_path(dotenv_path) {
                    bail!("Error loading dotenv file: {}", e);
                }
            }
        }

        // first merge the cli and env vars
        let cli_env_args = self.cli_env_args.merge_cli_env_args()?;

        // Start with the default values as the base
        let mut figment =
            Figment::new().merge(figment::providers::Serialized::defaults(CONFIG::default()));

        // the file is optional, every setting has a default
        match ConfigFilePath::new(CONFIG::FILENAME, cli_env_args.home_dir()).into_path() {
            Some(filepath) => {
                if ARG::PRINT_DEBUG_MSGS {
                    eprintln!("Loading config from {}", filepath.display());
                }

                figment = figment
                    // Then add default section from TOML
                    .merge(Figment::from(
                        figment::providers::Toml::file(&filepath).nested(),
                    ))
                    // Then add specific section, overriding globals where needed
                    .merge(
                        Figment::from(figment::providers::Toml::file(&filepath).nested())
                            .select(ARG::TOML_IDENTIFIER),
                    );
            }
            None => {
                if ARG::PRINT_DEBUG_MSGS {
                    eprintln!("No {} found, using defaults", CONFIG::FILENAME);
                }
            }
        }

        // Finally override with cli/env args
        // as globals, so they win over whichever toml section got selected
        let mut config: CONFIG = figment
            .merge(figment::providers::Serialized::globals(cli_env_args))
            .extract()?;

        config.with_paths(|path| {
            *path = shellexpand::tilde(&path.to_string_lossy())
                .to_string()
                .into();
        });

        Ok(config)
    }
}

// a helper to try a series of fallback paths, looking for a config file
#[derive(Clone, Debug)]
pub struct ConfigFilePath {
    // the filename to look for in each directory, e.g. "providers-register.toml"
    pub filename: String,
    // the optional directory set via direct args or env
    pub arg_env_dir: Option<PathBuf>,
}

impl ConfigFilePath {
    pub fn new(filename: impl ToString, arg_env_dir: Option<PathBuf>) -> Self {
        Self {
            filename: filename.to_string(),
            arg_env_dir,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        self.into_possible().into_iter().find(|path| path.exists())
    }

    // tries a series of fallbacks
    pub fn into_possible(self) -> Vec<PathBuf> {
        let Self {
            filename,
            arg_env_dir,
        } = self;

        // the paths returned will be tried in order of pushing
        let mut dirs = Vec::new();

        // explicit, e.g. passing --home /foo to a binary, or env var {ENV_PREFIX}_HOME="/foo"
        // i.e. the path in this case will be /foo/{filename}
        if let Some(dir) = arg_env_dir {
            dirs.push(dir);
        }

        // literal env var MEV_COMMIT_HOME
        if let Ok(dir) = std::env::var("MEV_COMMIT_HOME") {
            dirs.push(dir.into());
        }

        // next, check the current working directory, wherever the command is run from
        // i.e. ./{filename}
        if let Ok(dir) = std::env::current_dir() {
            dirs.push(dir);
        }

        // the user's home directory, hidden, e.g. ~/.mev-commit/{filename}
        if let Some(dir) = dirs::home_dir().map(|dir| dir.join(format!(".{CONFIG_DIRNAME}"))) {
            dirs.push(dir);
        }

        // the system config directory, this will vary:
        // Linux: ~/.config/mev-commit/{filename}
        // macOS: ~/Library/Application Support/mev-commit/{filename}
        if let Some(dir) = dirs::config_dir().map(|dir| dir.join(CONFIG_DIRNAME)) {
            dirs.push(dir);
        }

        // On linux, this may already be added via config_dir above
        // but on macOS it's helpful to add it explicitly
        if let Some(dir) = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .map(|dir| dir.join(CONFIG_DIRNAME))
        {
            dirs.push(dir);
        }

        // Lastly, try /etc/mev-commit/{filename}
        dirs.push(PathBuf::from("/etc").join(CONFIG_DIRNAME));

        // now we have a list of directories to check, we need to add the filename to each
        let mut all_files: Vec<PathBuf> = dirs.into_iter().map(|dir| dir.join(&filename)).collect();

        all_files.dedup();

        all_files
    }
}
