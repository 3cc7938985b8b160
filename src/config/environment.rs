// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, database URLs, adherence parameters, and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use fitcontrol_core::constants::adherence::{
    DEFAULT_CALENDAR_DAYS, DEFAULT_RECONCILIATION_CONCURRENCY, DEFAULT_STREAK_LOOKBACK_DAYS,
    DEFAULT_UTC_OFFSET_HOURS,
};
use fitcontrol_core::constants::ports::DEFAULT_HTTP_PORT;
use fitcontrol_intelligence::AdherenceConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};

/// Default on-disk database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fitcontrol.db";

/// Default pool size for file databases
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        })
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        })
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or bare file path
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an empty value or a non-SQLite scheme.
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::config_invalid("DATABASE_URL is empty"));
        }
        if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            let path = rest.trim_start_matches("//");
            if path == ":memory:" || path.is_empty() {
                return Ok(Self::Memory);
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path),
            });
        }
        if trimmed.contains("://") {
            return Err(AppError::config_invalid(format!(
                "Unsupported database URL scheme: {trimmed}"
            )));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/fitcontrol.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Create tables on startup
    pub auto_migrate: bool,
    /// Pool size for file databases; in-memory databases always use one connection
    pub max_connections: u32,
}

/// Adherence engine and tracker settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdherenceSettings {
    /// Offset defining "today"
    pub utc_offset_hours: i32,
    /// Streak lookback window, today included
    pub streak_lookback_days: u32,
    /// Calendar width, today included
    pub calendar_days: u32,
    /// Concurrent creations during reconciliation
    pub reconciliation_concurrency: usize,
}

impl Default for AdherenceSettings {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            streak_lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
            calendar_days: DEFAULT_CALENDAR_DAYS,
            reconciliation_concurrency: DEFAULT_RECONCILIATION_CONCURRENCY,
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Record store settings
    pub database: DatabaseConfig,
    /// Adherence settings
    pub adherence: AdherenceSettings,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                auto_migrate: true,
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            adherence: AdherenceSettings::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable is present but cannot be parsed
    /// or fails validation.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: env_parse("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
                auto_migrate: env_parse("AUTO_MIGRATE", true)?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            },
            adherence: AdherenceSettings {
                utc_offset_hours: env_parse("ADHERENCE_UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS)?,
                streak_lookback_days: env_parse(
                    "STREAK_LOOKBACK_DAYS",
                    DEFAULT_STREAK_LOOKBACK_DAYS,
                )?,
                calendar_days: env_parse("CALENDAR_DAYS", DEFAULT_CALENDAR_DAYS)?,
                reconciliation_concurrency: env_parse(
                    "RECONCILIATION_CONCURRENCY",
                    DEFAULT_RECONCILIATION_CONCURRENCY,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first invalid setting.
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(AppError::config_invalid("HTTP_PORT must be non-zero"));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::config_invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        if self.adherence.reconciliation_concurrency == 0 {
            return Err(AppError::config_invalid(
                "RECONCILIATION_CONCURRENCY must be at least 1",
            ));
        }
        if self.cors.allowed_origins.is_empty() {
            warn!("CORS_ALLOWED_ORIGINS is empty; browsers will be refused");
        }
        self.adherence_config().map(|_| ())
    }

    /// Engine parameters derived from the adherence settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an out-of-range offset or an empty window.
    pub fn adherence_config(&self) -> AppResult<AdherenceConfig> {
        AdherenceConfig::new(
            self.adherence.utc_offset_hours,
            self.adherence.streak_lookback_days,
            self.adherence.calendar_days,
        )
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitControl Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {} (auto-migrate: {})\n\
             - UTC Offset: {}h\n\
             - Streak Lookback: {} days\n\
             - Calendar Window: {} days\n\
             - Reconciliation Concurrency: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.log_level,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.database.auto_migrate,
            self.adherence.utc_offset_hours,
            self.adherence.streak_lookback_days,
            self.adherence.calendar_days,
            self.adherence.reconciliation_concurrency,
            self.cors.allowed_origins.join(", "),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:5173, https://app.example.com,,"),
            vec!["http://localhost:5173", "https://app.example.com"]
        );
    }

    #[test]
    fn test_database_url_parsing() {
        let file = DatabaseUrl::parse_url("sqlite:./test.db").unwrap();
        assert!(!file.is_memory());
        assert_eq!(file.to_connection_string(), "sqlite:./test.db");

        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());
        assert!(matches!(
            DatabaseUrl::parse_url("./some/path.db").unwrap(),
            DatabaseUrl::SQLite { .. }
        ));
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
    }

    #[test]
    fn test_log_level_and_environment_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("loud"), LogLevel::Info);
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.adherence.reconciliation_concurrency = 0;
        assert!(config.validate().is_err());

        config.adherence.reconciliation_concurrency = 4;
        config.adherence.utc_offset_hours = 15;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_mentions_adherence_settings() {
        let summary = ServerConfig::default().summary();
        assert!(summary.contains("UTC Offset: -6h"));
        assert!(summary.contains("Calendar Window: 35 days"));
    }
}
