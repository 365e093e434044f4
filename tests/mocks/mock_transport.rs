use async_trait::async_trait;
use mailserver::error::TransportError;
use mailserver::models::OutboundMessage;
use mailserver::transport::MailTransport;
use std::sync::{Arc, Mutex};

/// What the mock does when asked to send.
#[allow(dead_code)]
#[derive(Clone, Debug)]
enum Behavior {
    Accept,
    RejectAddress,
    FailSmtp(String),
}

/// Mock mail transport for testing.
///
/// Records every message it is handed and either accepts it or fails with
/// a configured transport error.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockTransport {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    behavior: Arc<Mutex<Behavior>>,
}

#[allow(dead_code)]
impl MockTransport {
    /// Create a transport that accepts every message.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            behavior: Arc::new(Mutex::new(Behavior::Accept)),
        }
    }

    /// Create a transport whose SMTP exchange always fails.
    pub fn failing(reason: &str) -> Self {
        let transport = Self::new();
        *transport.behavior.lock().unwrap() = Behavior::FailSmtp(reason.to_string());
        transport
    }

    /// Create a transport that rejects every address.
    pub fn rejecting_addresses() -> Self {
        let transport = Self::new();
        *transport.behavior.lock().unwrap() = Behavior::RejectAddress;
        transport
    }

    /// Number of send calls received.
    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Messages received, in call order.
    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message.clone());

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Accept => Ok(()),
            Behavior::RejectAddress => Err(TransportError::InvalidAddress(message.to.clone())),
            Behavior::FailSmtp(reason) => Err(TransportError::Smtp(reason)),
        }
    }
}
