//! Mailserver - stores email records and dispatches email through SMTP.
//!
//! The library keeps two independent pipelines behind one service: durable
//! email records (create, list, update, delete) and a synchronous send path
//! that hands a composed message to a mail transport. Sending never stores
//! a record and storing never sends.
//!
//! # Architecture
//!
//! - **models**: Email records, caller inputs and outbound messages
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Record store contract with SQLite and in-memory implementations
//! - **transport**: Mail transport contract with an SMTP implementation
//! - **services**: Validation, normalization and orchestration
//! - **observability**: Logging and metrics decorator around the service
//! - **server**: MCP protocol server exposing the operations as tools

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;
pub mod transport;

pub use config::Config;
pub use error::{ConfigError, MailError, MailResult, TransportError};
pub use models::{EmailDraft, EmailRecord, NewEmail, OutboundMessage, SendRequest};
pub use observability::{InstrumentedEmailService, MetricsTracker};
pub use repositories::{EmailRepository, InMemoryEmailRepository, SqliteEmailRepository};
pub use server::MailserverMcpServer;
pub use services::{EmailService, EmailServiceImpl};
pub use transport::{MailTransport, SmtpConfig, SmtpTransport, TlsMode};
