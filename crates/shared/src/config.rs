//! Application configuration management.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger rule configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins, separated by `;`. `*` allows any origin.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Returns the configured CORS origins, trimmed and without empty items.
    #[must_use]
    pub fn cors_origins(&self) -> Vec<&str> {
        self.cors_allowed_origins
            .split(';')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: default_cors_allowed_origins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

fn default_cors_allowed_origins() -> String {
    "*".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations when the server starts.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_run_migrations() -> bool {
    true
}

/// Bounds applied to reference dates of cash launches and balance queries.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Earliest accepted reference date.
    #[serde(default = "default_min_reference_date")]
    pub min_reference_date: NaiveDate,
    /// Latest accepted reference date, in years after the server start date.
    #[serde(default = "default_max_years_ahead")]
    pub max_years_ahead: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_reference_date: default_min_reference_date(),
            max_years_ahead: default_max_years_ahead(),
        }
    }
}

impl LedgerConfig {
    /// Checks that `min_reference_date` does not lie after `today`, so the
    /// window it opens with the yearly maximum is never reversed.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the offending date.
    pub fn check(&self, today: NaiveDate) -> Result<(), config::ConfigError> {
        if self.min_reference_date > today {
            return Err(config::ConfigError::Message(format!(
                "ledger.min_reference_date {} is after today ({today})",
                self.min_reference_date
            )));
        }
        Ok(())
    }
}

fn default_min_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_max_years_ahead() -> u32 {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "cashflow=debug,tower_http=debug".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the ledger
    /// window is inconsistent.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CASHFLOW").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.ledger.check(Utc::now().date_naive())?;
        Ok(app)
    }
}
