//! Configuration management for the SCA Cupping Journal
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. An optional configuration file (config/<environment>.toml)
//! 3. Environment variable overrides with CUPPING_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Local storage configuration
    pub storage: StorageConfig,

    /// Export configuration
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the key-value store files
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory exported JSON/CSV files are written to
    pub dir: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CUPPING_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("storage.dir", "data")?
            .set_default("export.dir", ".")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CUPPING_ prefix)
            .add_source(
                Environment::with_prefix("CUPPING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { dir: ".".to_string() }
    }
}
