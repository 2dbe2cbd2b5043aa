//! Configuration management for authent
//!
//! Loads settings from an optional `config.toml` with `AUTHENT_*` environment
//! overrides on top of built-in defaults.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::auth::hasher::{DEFAULT_COST, MAX_COST, MIN_COST};

/// Locations tried for the config file, first match wins.
const CONFIG_PATHS: [&str; 2] = [
    "authent/config", // Container layout: /app/authent/config.toml
    "config",         // Local development: ./config.toml
];

/// Complete application configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// bcrypt work factor used for new digests
    /// Environment: AUTHENT_HASH_COST
    pub hash_cost: u32,

    /// Run a dummy verification when the username is unknown
    /// Environment: AUTHENT_EQUALIZE_LOGIN_TIMING
    pub equalize_login_timing: bool,

    /// Longest accepted input line in the interactive menu
    pub max_input_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_cost: DEFAULT_COST,
            equalize_login_timing: true,
            max_input_length: 512,
        }
    }
}

impl AuthConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = CONFIG_PATHS
            .iter()
            .find(|p| std::path::Path::new(&format!("{}.toml", p)).exists())
            .copied()
            .unwrap_or("config");

        Self::load_from(path, Environment::with_prefix("AUTHENT"))
    }

    /// Load from a specific file stem (the file itself is optional) and environment source
    pub fn load_from(path: &str, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("hash_cost", i64::from(defaults.hash_cost))?
            .set_default("equalize_login_timing", defaults.equalize_login_timing)?
            .set_default("max_input_length", defaults.max_input_length as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?;

        let config: AuthConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_COST..=MAX_COST).contains(&self.hash_cost) {
            return Err(ConfigError::Message(format!(
                "hash_cost must be between {} and {}",
                MIN_COST, MAX_COST
            )));
        }

        if self.max_input_length == 0 {
            return Err(ConfigError::Message(
                "max_input_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
