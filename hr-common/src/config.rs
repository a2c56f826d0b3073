//! Configuration loading
//!
//! Every setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error; the service starts on defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the database path
pub const ENV_DATABASE: &str = "HR_ANALYTICS_DB";
/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "HR_ANALYTICS_HOST";
/// Environment variable overriding the listen port
pub const ENV_PORT: &str = "HR_ANALYTICS_PORT";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "HR_ANALYTICS_LOG";
/// Environment variable pointing at an alternate TOML file
pub const ENV_CONFIG: &str = "HR_ANALYTICS_CONFIG";
/// Environment variable overriding the per-client request budget
pub const ENV_RATE_LIMIT: &str = "HR_ANALYTICS_RATE_LIMIT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Requests per client per minute; 0 disables throttling
pub const DEFAULT_RATE_LIMIT: u32 = 600;

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk TOML configuration; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub rate_limit_per_minute: Option<u32>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Load a TOML file; a missing file yields the empty config
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found, using defaults: {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

        info!("Loaded config file: {}", path.display());
        Ok(config)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub rate_limit_per_minute: Option<u32>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub rate_limit_per_minute: u32,
}

impl ServiceConfig {
    /// Resolve configuration from CLI, environment, TOML and defaults
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let config_path = cli
            .config_file
            .clone()
            .or_else(|| env_var(ENV_CONFIG).map(PathBuf::from))
            .or_else(default_config_file);

        let toml_config = match &config_path {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };

        Self::resolve_with(cli, &toml_config)
    }

    /// Resolve against an already-loaded TOML config
    pub fn resolve_with(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let database_path = cli
            .database_path
            .clone()
            .or_else(|| env_var(ENV_DATABASE).map(PathBuf::from))
            .or_else(|| toml_config.database_path.clone())
            .unwrap_or_else(default_database_path);

        let host = cli
            .host
            .clone()
            .or_else(|| env_var(ENV_HOST))
            .or_else(|| toml_config.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match (cli.port, env_var(ENV_PORT)) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("{}={} is not a valid port: {}", ENV_PORT, raw, e)))?,
            (None, None) => toml_config.port.unwrap_or(DEFAULT_PORT),
        };

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| env_var(ENV_LOG_LEVEL))
            .or_else(|| toml_config.logging.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let rate_limit_per_minute = match (cli.rate_limit_per_minute, env_var(ENV_RATE_LIMIT)) {
            (Some(limit), _) => limit,
            (None, Some(raw)) => raw.parse::<u32>().map_err(|e| {
                Error::Config(format!("{}={} is not a valid request count: {}", ENV_RATE_LIMIT, raw, e))
            })?,
            (None, None) => toml_config.rate_limit_per_minute.unwrap_or(DEFAULT_RATE_LIMIT),
        };

        Ok(Self {
            database_path,
            host,
            port,
            log_level,
            rate_limit_per_minute,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Default TOML location: `<config dir>/hr-analytics/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hr-analytics").join("config.toml"))
}

/// OS-dependent default database path
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hr-analytics"))
        .unwrap_or_else(|| PathBuf::from("./hr_data"))
        .join("hr.db")
}
