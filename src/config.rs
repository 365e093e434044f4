//! Configuration management for the mail server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! optional .env file with dotenvy, which writes nothing.

use crate::error::{ConfigError, ConfigResult};
use crate::transport::{SmtpConfig, TlsMode};
use std::env;

/// Default database location, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://mailserver.db";

/// Configuration for the mail server.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (default: `sqlite://mailserver.db`)
    pub database_url: String,

    /// Outbound SMTP relay settings
    pub smtp: SmtpConfig,

    /// Log level used when `RUST_LOG` is not set (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SMTP_HOST`: SMTP relay hostname
    ///
    /// Optional environment variables:
    /// - `DATABASE_URL`: SQLite URL (default: `sqlite://mailserver.db`)
    /// - `SMTP_PORT`: SMTP port (default: 587)
    /// - `SMTP_USERNAME` / `SMTP_PASSWORD`: credentials, used only when both are set
    /// - `SMTP_TLS`: `starttls`, `tls` or `none` (default: `starttls`)
    /// - `SMTP_TIMEOUT`: connection timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        if !database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_URL".to_string(),
                reason: "Must be a sqlite: URL".to_string(),
            });
        }

        let host =
            env::var("SMTP_HOST").map_err(|_| ConfigError::MissingVar("SMTP_HOST".to_string()))?;

        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SMTP_HOST".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let port = Self::parse_env_u16("SMTP_PORT", 587)?;
        let timeout_secs = Self::parse_env_u64("SMTP_TIMEOUT", 10)?;

        let tls = match env::var("SMTP_TLS") {
            Ok(val) => val
                .parse::<TlsMode>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "SMTP_TLS".to_string(),
                    reason,
                })?,
            Err(_) => TlsMode::default(),
        };

        let username = Self::optional_env("SMTP_USERNAME");
        let password = Self::optional_env("SMTP_PASSWORD");

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            database_url,
            smtp: SmtpConfig {
                host: host.trim().to_string(),
                port,
                username,
                password,
                tls,
                timeout_secs,
            },
            log_level,
        })
    }

    /// Read an environment variable, treating blank values as unset.
    fn optional_env(var_name: &str) -> Option<String> {
        env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            smtp: SmtpConfig::default(),
            log_level: "info".to_string(),
        }
    }
}
