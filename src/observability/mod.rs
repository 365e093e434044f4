//! Observability module for logging and metrics.
//!
//! Structured logging and operation metrics are applied around the email
//! service as a decorator rather than inline in the business logic.

pub mod instrumented;
pub mod metrics;

pub use instrumented::InstrumentedEmailService;
pub use metrics::{MetricsTracker, Timer};
