use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::BuildError;
use crate::time_unit::TimeUnit;

/// Configuration table holding debounce settings
pub const SETTINGS_KEY: &str = "debounce";

/// Environment variables with this prefix overlay file values,
/// e.g. `DEBOUNCE_DELAY=500ms` or `DEBOUNCE_UNIT=seconds`. The `_` separator
/// splits nested keys, so the unit variable uses the short `unit` alias.
pub const ENV_PREFIX: &str = "DEBOUNCE";

/// Delay as written in configuration: a bare number or a shorthand like `"250ms"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelayValue {
    Number(u64),
    Text(String),
}

/// The `[debounce]` configuration table
///
/// ```toml
/// [debounce]
/// delay = "300ms"
/// time_unit = "milliseconds"
/// ```
///
/// `unit` is accepted as an alias of `time_unit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceSettings {
    #[serde(default)]
    pub delay: Option<DelayValue>,
    #[serde(default, alias = "unit")]
    pub time_unit: Option<String>,
}

impl DebounceSettings {
    /// Read the `[debounce]` table; a missing table yields the defaults.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        match config.get::<DebounceSettings>(SETTINGS_KEY) {
            Ok(settings) => Ok(settings),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Unit for bare numeric delays, milliseconds when unset.
    pub fn time_unit(&self) -> Result<Option<TimeUnit>, BuildError> {
        self.time_unit
            .as_deref()
            .map(|unit| unit.parse().map_err(|_| BuildError::InvalidTimeUnit(unit.to_string())))
            .transpose()
    }

    /// Resolve the configured delay, if any, using `unit` for bare numbers.
    pub fn delay(&self, unit: TimeUnit) -> Result<Option<Duration>, BuildError> {
        match &self.delay {
            None => Ok(None),
            Some(DelayValue::Number(value)) => Ok(Some(unit.to_duration(*value))),
            Some(DelayValue::Text(text)) => unit
                .resolve_delay(text)
                .map(Some)
                .ok_or_else(|| BuildError::InvalidDelay(text.clone())),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("_")
        .keep_prefix(true)
}

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .add_source(env_source())
        .build()
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
        .add_source(env_source())
        .build()
}

/// Load config from environment variables only
pub fn load_env_config() -> Result<Config, ConfigError> {
    Config::builder().add_source(env_source()).build()
}

/// Resolve config placeholder like ${search.delay} or ${search.delay:250ms}
pub fn resolve_config_value(value: &str, config: &Config) -> Result<String, BuildError> {
    let Some(inner) = value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Ok(value.to_string());
    };

    // Check if there's a default value (e.g., ${search.delay:250ms})
    if let Some((key, default_value)) = inner.split_once(':') {
        match config.get_string(key) {
            Ok(resolved) => Ok(resolved),
            Err(_) => Ok(default_value.to_string()),
        }
    } else {
        config
            .get_string(inner)
            .map_err(|_| BuildError::UnresolvedPlaceholder(inner.to_string()))
    }
}
