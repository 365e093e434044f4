//! Error types for the mail server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors surfaced by the email service and the record store.
#[derive(Error, Debug)]
pub enum MailError {
    /// A required field was missing or blank
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation targeted a record that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The mail transport rejected or failed to send the message
    #[error("Failed to dispatch email: {0}")]
    DispatchFailed(#[source] TransportError),

    /// The record store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for MailError {
    fn from(err: sqlx::Error) -> Self {
        MailError::Storage(err.to_string())
    }
}

/// Errors reported by a mail transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// An address could not be parsed as a mailbox
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The message could not be composed
    #[error("failed to build message: {0}")]
    Build(String),

    /// The SMTP exchange failed
    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with MailError
pub type MailResult<T> = Result<T, MailError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
