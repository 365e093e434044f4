//! Mailserver - Main entry point
//!
//! Wires the SQLite record store and the SMTP transport into the email
//! service and serves it over MCP on stdio.

use anyhow::Result;
use mailserver::repositories::{EmailRepository, SqliteEmailRepository};
use mailserver::services::{EmailService, EmailServiceImpl};
use mailserver::transport::{MailTransport, SmtpTransport};
use mailserver::{Config, InstrumentedEmailService, MailserverMcpServer, MetricsTracker};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting mailserver with database {} and SMTP relay {}:{} ({})",
        config.database_url, config.smtp.host, config.smtp.port, config.smtp.tls
    );

    // Initialize the record store and the mail transport
    let repository =
        Arc::new(SqliteEmailRepository::connect(&config.database_url).await?) as Arc<dyn EmailRepository>;
    let transport = Arc::new(SmtpTransport::from_config(&config.smtp)?) as Arc<dyn MailTransport>;

    // Service with logging and metrics around it
    let metrics = MetricsTracker::new();
    let service = InstrumentedEmailService::new(
        EmailServiceImpl::new(repository, transport),
        metrics.clone(),
    );
    let server = MailserverMcpServer::new(Arc::new(service) as Arc<dyn EmailService>);

    info!("Mailserver initialized");

    // Run the server (this will block until the client disconnects)
    info!("Starting MCP server with stdio transport");
    let result = mailserver::server::run_server(server).await;

    info!("{}", metrics.summary());
    info!("Mailserver shutdown complete");
    result
}
