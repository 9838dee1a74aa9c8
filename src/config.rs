//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/citynet/citynet.toml`
//! 3. Explicit config file: `--config <file>`
//! 4. Environment variables: `CITYNET_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DuplicateCityPolicy;

/// How views are printed by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
}

/// Unified configuration for citynet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Behavior of `city add` for a name that already exists
    pub duplicate_cities: DuplicateCityPolicy,
    /// Default output for zone trees
    pub output: OutputFormat,
    /// Pretty-print JSON views
    pub pretty_json: bool,
    /// Keep applying script lines after a failed action
    pub keep_going: bool,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub duplicate_cities: Option<DuplicateCityPolicy>,
    pub output: Option<OutputFormat>,
    pub pretty_json: Option<bool>,
    pub keep_going: Option<bool>,
}

/// Get the XDG config directory for citynet.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "citynet").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("citynet.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            duplicate_cities: overlay.duplicate_cities.unwrap_or(self.duplicate_cities),
            output: overlay.output.unwrap_or(self.output),
            pretty_json: overlay.pretty_json.unwrap_or(self.pretty_json),
            keep_going: overlay.keep_going.unwrap_or(self.keep_going),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("loading config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current, Environment::with_prefix("CITYNET"))
    }

    /// Apply CITYNET_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env.prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("duplicate_cities") {
            settings.duplicate_cities = parse_value(&val, "duplicate_cities")?;
        }
        if let Ok(val) = config.get_string("output") {
            settings.output = parse_value(&val, "output")?;
        }
        if let Some(val) = env_bool(&config, "pretty_json")? {
            settings.pretty_json = val;
        }
        if let Some(val) = env_bool(&config, "keep_going")? {
            settings.keep_going = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# citynet configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/citynet/citynet.toml
#   File:   --config <file>
#   Env:    CITYNET_* environment variables

# "reject" fails `city add` for an existing name,
# "replace" drops the old city with its zones and connections
# duplicate_cities = "reject"

# Zone tree output: "tree" or "json"
# output = "tree"

# pretty_json = false

# Continue a script after a failed action, reporting failures at the end
# keep_going = false
"#
        .to_string()
    }
}

/// Parse a lowercase enum value the same way the TOML layer does.
fn parse_value<T: serde::de::DeserializeOwned>(
    value: &str,
    key: &str,
) -> Result<T, ApplicationError> {
    T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(
        &value.to_lowercase(),
    ))
    .map_err(|e| ApplicationError::Config {
        message: format!("invalid {key}: {value} ({e})"),
    })
}

/// Boolean override; absent is `None`, present but unparsable is an error.
fn env_bool(config: &Config, key: &str) -> Result<Option<bool>, ApplicationError> {
    match config.get_bool(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("invalid {key}: {e}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
