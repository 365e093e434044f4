//! Email record model and the inputs that create or overwrite it.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MailError, MailResult};

/// A stored email message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    /// Store-assigned identifier, immutable once assigned
    pub id: i64,

    /// Sender address
    pub from_email: String,

    /// Recipient address
    pub to_email: String,

    /// Subject line
    pub subject: String,

    /// Plain text body
    pub body: String,

    /// When the message was written. Always set by create; update stores
    /// whatever the caller supplied.
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmailRecord {
    /// Build a record from its id and validated content.
    pub fn from_new(id: i64, email: &NewEmail) -> Self {
        Self {
            id,
            from_email: email.from_email.clone(),
            to_email: email.to_email.clone(),
            subject: email.subject.clone(),
            body: email.body.clone(),
            timestamp: email.timestamp,
        }
    }
}

/// Caller input for creating or overwriting a record.
///
/// Every field is optional so that absent values can be reported as
/// validation failures instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailDraft {
    pub from_email: Option<String>,
    pub to_email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmailDraft {
    /// Create a draft with all four content fields set and no timestamp.
    pub fn new(
        from_email: impl Into<String>,
        to_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from_email: Some(from_email.into()),
            to_email: Some(to_email.into()),
            subject: Some(subject.into()),
            body: Some(body.into()),
            timestamp: None,
        }
    }

    /// Set the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Validated record content, ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmail {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Parse a caller-supplied timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T12:00:00+02:00`)
/// and zone-less ISO 8601 (`2024-05-01T10:00:00`), which is read as UTC.
pub fn parse_timestamp(value: &str) -> MailResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| MailError::InvalidArgument(format!("invalid timestamp: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = EmailRecord {
            id: 1,
            from_email: "a@x.com".to_string(),
            to_email: "b@x.com".to_string(),
            subject: "Hi".to_string(),
            body: "Hello".to_string(),
            timestamp: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fromEmail"], "a@x.com");
        assert_eq!(value["toEmail"], "b@x.com");
        assert!(value["timestamp"].is_null());
    }

    #[test]
    fn test_draft_deserializes_missing_fields_as_none() {
        let draft: EmailDraft =
            serde_json::from_str(r#"{"fromEmail": "a@x.com", "subject": "Hi"}"#).unwrap();
        assert_eq!(draft.from_email.as_deref(), Some("a@x.com"));
        assert!(draft.to_email.is_none());
        assert!(draft.body.is_none());
        assert!(draft.timestamp.is_none());
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_without_zone() {
        let ts = parse_timestamp("2024-05-01T10:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

        let ts = parse_timestamp("2024-05-01T10:00:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        let result = parse_timestamp("yesterday");
        assert!(matches!(result, Err(MailError::InvalidArgument(_))));
    }
}
