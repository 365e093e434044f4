//! SMTP transport using lettre.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::MailTransport;
use crate::error::TransportError;
use crate::models::OutboundMessage;

/// How the connection to the relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS.
    #[default]
    StartTls,
    /// Implicit TLS from the first byte.
    Tls,
    /// No encryption. Local relays and test servers only.
    None,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(TlsMode::StartTls),
            "tls" => Ok(TlsMode::Tls),
            "none" => Ok(TlsMode::None),
            other => Err(format!(
                "expected one of starttls, tls, none; got: {}",
                other
            )),
        }
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsMode::StartTls => write!(f, "starttls"),
            TlsMode::Tls => write!(f, "tls"),
            TlsMode::None => write!(f, "none"),
        }
    }
}

/// Connection settings for the SMTP relay.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,

    /// SMTP server port (default: 587).
    pub port: u16,

    /// SMTP username for authentication.
    pub username: Option<String>,

    /// SMTP password for authentication.
    pub password: Option<String>,

    /// Connection security (default: STARTTLS).
    pub tls: TlsMode,

    /// Connection timeout in seconds (default: 10).
    pub timeout_secs: u64,
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("tls", &self.tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            username: None,
            password: None,
            tls: TlsMode::StartTls,
            timeout_secs: 10,
        }
    }
}

/// SMTP-based mail transport.
#[derive(Clone)]
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Create a transport from explicit configuration.
    ///
    /// No connection is opened until the first message is sent.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, TransportError> {
        let mut builder = match config.tls {
            TlsMode::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            }
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| TransportError::Smtp(e.to_string()))?,
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| TransportError::Smtp(e.to_string()))?
            }
        };

        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    /// Compose a plain-text lettre message.
    pub fn build_message(message: &OutboundMessage) -> Result<Message, TransportError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|_| TransportError::InvalidAddress(message.from.clone()))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|_| TransportError::InvalidAddress(message.to.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| TransportError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let email = Self::build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| TransportError::Smtp(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(from: &str, to: &str) -> OutboundMessage {
        OutboundMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
        }
    }

    #[test]
    fn test_tls_mode_parse() {
        assert_eq!("starttls".parse::<TlsMode>().unwrap(), TlsMode::StartTls);
        assert_eq!("TLS".parse::<TlsMode>().unwrap(), TlsMode::Tls);
        assert_eq!(" none ".parse::<TlsMode>().unwrap(), TlsMode::None);
        assert!("ssl".parse::<TlsMode>().is_err());
    }

    #[test]
    fn test_build_message() {
        let email = SmtpTransport::build_message(&message("a@x.com", "b@x.com")).unwrap();
        let formatted = String::from_utf8(email.formatted()).unwrap();

        assert!(formatted.contains("From: a@x.com"));
        assert!(formatted.contains("To: b@x.com"));
        assert!(formatted.contains("Subject: Hi"));
        assert!(formatted.contains("Hello"));
    }

    #[test]
    fn test_build_message_invalid_sender() {
        let result = SmtpTransport::build_message(&message("not an address", "b@x.com"));
        assert!(matches!(result, Err(TransportError::InvalidAddress(a)) if a == "not an address"));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let result = SmtpTransport::build_message(&message("a@x.com", "b@"));
        assert!(matches!(result, Err(TransportError::InvalidAddress(_))));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("smtp.example.com"));
    }

    #[tokio::test]
    async fn test_from_config_is_lazy() {
        let config = SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            tls: TlsMode::None,
            ..Default::default()
        };
        assert!(SmtpTransport::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_send_invalid_address_fails_before_connecting() {
        let config = SmtpConfig {
            host: "localhost".to_string(),
            port: 1,
            tls: TlsMode::None,
            ..Default::default()
        };
        let transport = SmtpTransport::from_config(&config).unwrap();

        let result = transport.send(&message("broken", "b@x.com")).await;
        assert!(matches!(result, Err(TransportError::InvalidAddress(_))));
    }
}
