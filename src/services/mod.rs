//! Application service layer.
//!
//! Services contain business logic and sit between the MCP handlers and
//! the record store and mail transport.

mod email_service;

pub use email_service::{EmailService, EmailServiceImpl};
