//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONSULTATION` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use consultation_platform::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listing {} consultations per page", config.resolution.consultations_per_page);
//! ```

mod error;
mod logging;
mod resolution;

pub use error::{ConfigError, ValidationError};
pub use logging::{Environment, LoggingConfig};
pub use resolution::{ResolutionConfig, MAX_CONSULTATIONS_PER_PAGE};

use std::path::Path;

use serde::Deserialize;

const ENV_PREFIX: &str = "CONSULTATION";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Decision workflow and listing behaviour
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONSULTATION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CONSULTATION__LOGGING__LEVEL=debug` -> `logging.level = "debug"`
    /// - `CONSULTATION__RESOLUTION__STRICT_INVARIANTS=true` -> `resolution.strict_invariants = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables layered on top.
    ///
    /// The file format follows the extension (`.toml`, `.json`, ...).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.resolution.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.logging.is_production()
    }
}

fn env_source() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}
