//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::form::FormRules;
use crate::core::validation::UnknownTypePolicy;
use serde::{Deserialize, Serialize};

/// Environment variable naming a YAML config file
pub const CONFIG_ENV_VAR: &str = "CARDWALLET_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Add-card form settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Length rule for numbers with no recognized network
    pub unknown_type_policy: UnknownTypePolicy,

    /// Spread pasted digits over all four number groups
    pub paste_autofill: bool,

    /// First expiry year that is no longer accepted
    pub max_year: i32,
}

impl Default for FormConfig {
    fn default() -> Self {
        let rules = FormRules::default();
        Self {
            unknown_type_policy: rules.unknown_type_policy,
            paste_autofill: false,
            max_year: rules.max_year,
        }
    }
}

impl FormConfig {
    pub fn rules(&self) -> FormRules {
        FormRules {
            unknown_type_policy: self.unknown_type_policy,
            max_year: self.max_year,
        }
    }
}

/// Complete application configuration
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: Option<String>,

    pub form: FormConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.check()?;
        Ok(config)
    }

    /// Load from the path given on the command line, then the
    /// `CARDWALLET_CONFIG` variable, else defaults
    pub fn load(cli_path: Option<String>) -> Result<Self, ConfigError> {
        match cli_path.or_else(|| std::env::var(CONFIG_ENV_VAR).ok()) {
            Some(path) => Self::from_yaml_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(2001..=2099).contains(&self.form.max_year) {
            return Err(ConfigError::InvalidValue {
                field: "form.max_year".to_string(),
                message: format!(
                    "must be a year between 2001 and 2099, got {}",
                    self.form.max_year
                ),
            });
        }
        Ok(())
    }
}
