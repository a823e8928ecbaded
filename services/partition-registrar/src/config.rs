use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the target catalog database
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";
/// Environment variable naming the target catalog table
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Errors that can occur during configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// Main configuration for the partition registrar
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,
    /// Catalog target configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name for logging
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Glue catalog configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Database holding the partitioned table
    #[serde(default)]
    pub database_name: String,
    /// Partitioned table receiving new partitions
    #[serde(default)]
    pub table_name: String,
    /// AWS region override; the SDK default chain applies when unset
    pub region: Option<String>,
    /// Custom endpoint URL (for LocalStack etc.)
    pub endpoint_url: Option<String>,
}

fn default_service_name() -> String {
    "partition-registrar".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from config files and environment.
    ///
    /// `DATABASE_NAME` and `TABLE_NAME` are read verbatim; everything else uses
    /// the `REGISTRAR__` prefix (e.g. `REGISTRAR__CATALOG__REGION`).
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/registrar").required(false))
            .add_source(config::File::with_name("/etc/registrar/registrar").required(false))
            .add_source(
                config::Environment::with_prefix("REGISTRAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("catalog.database_name", std::env::var(DATABASE_NAME_VAR).ok())?
            .set_override_option("catalog.table_name", std::env::var(TABLE_NAME_VAR).ok())?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.database_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired(DATABASE_NAME_VAR.to_string()));
        }

        if self.catalog.table_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired(TABLE_NAME_VAR.to_string()));
        }

        Ok(())
    }
}
