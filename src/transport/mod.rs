//! Outbound mail transport.
//!
//! The service only knows the [`MailTransport`] trait; the wire protocol is
//! entirely the implementation's concern. [`SmtpTransport`] delivers through
//! an SMTP relay using lettre.

mod smtp;

pub use smtp::{SmtpConfig, SmtpTransport, TlsMode};

use crate::error::TransportError;
use crate::models::OutboundMessage;
use async_trait::async_trait;

/// Synchronous-from-the-caller's-view delivery of a single message.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send a message.
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}
