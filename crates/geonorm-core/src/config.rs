use crate::error::{GeonormError, Result};
use crate::normalize::NormalizeConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Set by the embedding program
    Explicit,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Explicit => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the normalizer
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub hint_key: ConfigValue<String>,
    pub record_original_type: ConfigValue<bool>,
    pub strip_hint_on_decode: ConfigValue<bool>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let defaults = NormalizeConfig::default();
        Self {
            hint_key: ConfigValue::new(defaults.hint_key, ConfigSource::Default),
            record_original_type: ConfigValue::new(
                defaults.record_original_type,
                ConfigSource::Default,
            ),
            strip_hint_on_decode: ConfigValue::new(
                defaults.strip_hint_on_decode,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeonormError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeonormError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(hint_key) = file_config.hint_key {
            self.hint_key.update(hint_key, ConfigSource::File);
        }

        if let Some(record) = file_config.record_original_type {
            self.record_original_type.update(record, ConfigSource::File);
        }

        if let Some(strip) = file_config.strip_hint_on_decode {
            self.strip_hint_on_decode.update(strip, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEONORM_HINT_KEY
        if let Ok(hint_key) = env::var("GEONORM_HINT_KEY") {
            if hint_key.is_empty() {
                tracing::warn!("Ignoring empty GEONORM_HINT_KEY");
            } else {
                self.hint_key.update(hint_key, ConfigSource::Environment);
            }
        }

        // GEONORM_RECORD_ORIGINAL_TYPE
        if let Ok(flag) = env::var("GEONORM_RECORD_ORIGINAL_TYPE") {
            match parse_flag("record_original_type", &flag) {
                Ok(record) => self.record_original_type.update(record, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEONORM_RECORD_ORIGINAL_TYPE value '{}': expected true or false",
                    flag
                ),
            }
        }

        // GEONORM_STRIP_HINT_ON_DECODE
        if let Ok(flag) = env::var("GEONORM_STRIP_HINT_ON_DECODE") {
            match parse_flag("strip_hint_on_decode", &flag) {
                Ok(strip) => self.strip_hint_on_decode.update(strip, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEONORM_STRIP_HINT_ON_DECODE value '{}': expected true or false",
                    flag
                ),
            }
        }

        self
    }

    /// Apply overrides set by the embedding program
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(hint_key) = overrides.hint_key {
            self.hint_key.update(hint_key, ConfigSource::Explicit);
        }

        if let Some(record) = overrides.record_original_type {
            self.record_original_type.update(record, ConfigSource::Explicit);
        }

        if let Some(strip) = overrides.strip_hint_on_decode {
            self.strip_hint_on_decode.update(strip, ConfigSource::Explicit);
        }
    }

    /// Collapse the layers into the plain settings used by a `Normalizer`
    pub fn resolve(&self) -> Result<NormalizeConfig> {
        if self.hint_key.value.is_empty() {
            return Err(GeonormError::ConfigInvalid {
                key: "hint_key".to_string(),
                reason: "hint key must not be empty".to_string(),
            });
        }

        Ok(NormalizeConfig {
            hint_key: self.hint_key.value.clone(),
            record_original_type: self.record_original_type.value,
            strip_hint_on_decode: self.strip_hint_on_decode.value,
        })
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("hint_key".to_string(), (self.hint_key.value.clone(), self.hint_key.source));

        map.insert(
            "record_original_type".to_string(),
            (self.record_original_type.value.to_string(), self.record_original_type.source),
        );

        map.insert(
            "strip_hint_on_decode".to_string(),
            (self.strip_hint_on_decode.value.to_string(), self.strip_hint_on_decode.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    hint_key: Option<String>,
    record_original_type: Option<bool>,
    strip_hint_on_decode: Option<bool>,
}

/// Overrides supplied by the embedding program
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub hint_key: Option<String>,
    pub record_original_type: Option<bool>,
    pub strip_hint_on_decode: Option<bool>,
}

/// Parse a boolean flag from string
pub fn parse_flag(key: &str, s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GeonormError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid flag: {}. Use true or false", s),
        }),
    }
}
