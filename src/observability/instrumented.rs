//! Logging and metrics decorator for [`EmailService`].
//!
//! The core service stays free of observability concerns; this wrapper logs
//! every operation's outcome and feeds the [`MetricsTracker`].

use crate::error::{MailError, MailResult};
use crate::models::{EmailDraft, EmailRecord, SendRequest};
use crate::observability::{MetricsTracker, Timer};
use crate::services::EmailService;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// An [`EmailService`] that logs and measures every call to `inner`.
pub struct InstrumentedEmailService<S> {
    inner: S,
    metrics: MetricsTracker,
}

impl<S: EmailService> InstrumentedEmailService<S> {
    /// Wrap a service, recording into `metrics`.
    pub fn new(inner: S, metrics: MetricsTracker) -> Self {
        Self { inner, metrics }
    }

    /// The tracker this wrapper records into.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    fn record<T>(&self, operation: &str, timer: Timer, result: &MailResult<T>) {
        let duration_ms = timer.finish_with_status(result.is_ok());
        self.metrics
            .track_operation(operation, duration_ms, result.is_ok());

        if let Err(e) = result {
            log_failure(operation, e);
        }
    }
}

/// Client mistakes are warnings; store and transport failures are errors.
fn log_failure(operation: &str, err: &MailError) {
    match err {
        MailError::InvalidArgument(_) | MailError::NotFound(_) => {
            warn!(operation = %operation, error = %err, "Request rejected")
        }
        MailError::DispatchFailed(cause) => {
            error!(operation = %operation, cause = %cause, "Email dispatch failed")
        }
        MailError::Storage(_) => error!(operation = %operation, error = %err, "Storage failure"),
    }
}

#[async_trait]
impl<S: EmailService> EmailService for InstrumentedEmailService<S> {
    async fn create_email(&self, draft: EmailDraft) -> MailResult<EmailRecord> {
        info!(
            from = draft.from_email.as_deref().unwrap_or(""),
            to = draft.to_email.as_deref().unwrap_or(""),
            "Creating email"
        );
        let timer = Timer::new("create_email");

        let result = self.inner.create_email(draft).await;
        self.record("create_email", timer, &result);

        if let Ok(record) = &result {
            info!(id = record.id, "Email created");
        }
        result
    }

    async fn list_emails(&self) -> MailResult<Vec<EmailRecord>> {
        let timer = Timer::new("list_emails");

        let result = self.inner.list_emails().await;
        self.record("list_emails", timer, &result);

        if let Ok(records) = &result {
            info!(count = records.len(), "Listed emails");
        }
        result
    }

    async fn delete_email(&self, id: i64) -> MailResult<()> {
        info!(id = id, "Deleting email");
        let timer = Timer::new("delete_email");

        let result = self.inner.delete_email(id).await;
        self.record("delete_email", timer, &result);

        if result.is_ok() {
            info!(id = id, "Email deleted");
        }
        result
    }

    async fn update_email(&self, id: i64, draft: EmailDraft) -> MailResult<EmailRecord> {
        info!(id = id, "Updating email");
        let timer = Timer::new("update_email");

        let result = self.inner.update_email(id, draft).await;
        self.record("update_email", timer, &result);

        if result.is_ok() {
            info!(id = id, "Email updated");
        }
        result
    }

    async fn send_email(&self, request: SendRequest) -> MailResult<()> {
        let from = request.from_email.clone().unwrap_or_default();
        let to = request.to_email.clone().unwrap_or_default();
        info!(
            from = %from,
            to = %to,
            subject = request.subject.as_deref().unwrap_or(""),
            "Sending email"
        );
        let timer = Timer::new("send_email");

        let result = self.inner.send_email(request).await;
        self.record("send_email", timer, &result);

        match &result {
            Ok(()) => {
                self.metrics.track_dispatch(true);
                info!(from = %from, to = %to, "Email sent");
            }
            Err(MailError::DispatchFailed(_)) => self.metrics.track_dispatch(false),
            // Rejected before reaching the transport.
            Err(_) => {}
        }
        result
    }
}
