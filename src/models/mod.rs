//! Data models for stored email records and outbound messages.

pub mod email;
pub mod message;

pub use email::{parse_timestamp, EmailDraft, EmailRecord, NewEmail};
pub use message::{OutboundMessage, SendRequest};
