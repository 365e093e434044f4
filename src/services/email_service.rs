//! Email service layer.
//!
//! Validates and normalizes records before persistence, and composes
//! outbound messages for the mail transport. Persistence and dispatch are
//! independent: sending never writes a record and creating never sends.

use crate::error::{MailError, MailResult};
use crate::models::{EmailDraft, EmailRecord, NewEmail, OutboundMessage, SendRequest};
use crate::repositories::EmailRepository;
use crate::transport::MailTransport;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Email service trait for business operations.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Store a new record. A missing timestamp is set to the current time.
    async fn create_email(&self, draft: EmailDraft) -> MailResult<EmailRecord>;

    /// Return every stored record.
    async fn list_emails(&self) -> MailResult<Vec<EmailRecord>>;

    /// Delete a record by id.
    async fn delete_email(&self, id: i64) -> MailResult<()>;

    /// Overwrite all content fields and the timestamp of an existing record.
    /// The timestamp is stored exactly as given, including its absence.
    async fn update_email(&self, id: i64, draft: EmailDraft) -> MailResult<EmailRecord>;

    /// Hand a message to the mail transport. One attempt, no retry.
    async fn send_email(&self, request: SendRequest) -> MailResult<()>;
}

/// Default implementation of EmailService.
pub struct EmailServiceImpl {
    repository: Arc<dyn EmailRepository>,
    transport: Arc<dyn MailTransport>,
}

/// Validation helper functions.
impl EmailServiceImpl {
    /// Check that every required field is present and not blank.
    ///
    /// Reports all offending fields at once, by their wire names.
    fn require_fields(fields: [(&str, Option<&str>); 4]) -> MailResult<()> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MailError::InvalidArgument(format!(
                "all fields (fromEmail, toEmail, subject, body) must be filled in; missing: {}",
                missing.join(", ")
            )))
        }
    }

    fn validate_draft(draft: EmailDraft) -> MailResult<NewEmail> {
        Self::require_fields([
            ("fromEmail", draft.from_email.as_deref()),
            ("toEmail", draft.to_email.as_deref()),
            ("subject", draft.subject.as_deref()),
            ("body", draft.body.as_deref()),
        ])?;

        Ok(NewEmail {
            from_email: draft.from_email.unwrap_or_default(),
            to_email: draft.to_email.unwrap_or_default(),
            subject: draft.subject.unwrap_or_default(),
            body: draft.body.unwrap_or_default(),
            timestamp: draft.timestamp,
        })
    }

    fn validate_send_request(request: SendRequest) -> MailResult<OutboundMessage> {
        Self::require_fields([
            ("fromEmail", request.from_email.as_deref()),
            ("toEmail", request.to_email.as_deref()),
            ("subject", request.subject.as_deref()),
            ("body", request.body.as_deref()),
        ])?;

        Ok(OutboundMessage {
            from: request.from_email.unwrap_or_default(),
            to: request.to_email.unwrap_or_default(),
            subject: request.subject.unwrap_or_default(),
            body: request.body.unwrap_or_default(),
        })
    }
}

impl EmailServiceImpl {
    /// Create a new email service.
    pub fn new(repository: Arc<dyn EmailRepository>, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            repository,
            transport,
        }
    }
}

#[async_trait]
impl EmailService for EmailServiceImpl {
    async fn create_email(&self, draft: EmailDraft) -> MailResult<EmailRecord> {
        let mut email = Self::validate_draft(draft)?;

        if email.timestamp.is_none() {
            let now = Utc::now();
            debug!("Defaulting timestamp to {}", now);
            email.timestamp = Some(now);
        }

        self.repository.save(None, &email).await
    }

    async fn list_emails(&self) -> MailResult<Vec<EmailRecord>> {
        self.repository.find_all().await
    }

    async fn delete_email(&self, id: i64) -> MailResult<()> {
        self.repository.delete_by_id(id).await
    }

    async fn update_email(&self, id: i64, draft: EmailDraft) -> MailResult<EmailRecord> {
        let email = Self::validate_draft(draft)?;
        self.repository.update_if_exists(id, &email).await
    }

    async fn send_email(&self, request: SendRequest) -> MailResult<()> {
        let message = Self::validate_send_request(request)?;

        debug!(from = %message.from, to = %message.to, "Handing message to transport");
        self.transport
            .send(&message)
            .await
            .map_err(MailError::DispatchFailed)
    }
}
