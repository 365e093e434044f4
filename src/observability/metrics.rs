//! Operation metrics.
//!
//! Counters for the email service operations, shared across clones of the
//! tracker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics tracker for the email service.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    operations_total: Arc<AtomicU64>,
    operation_errors_total: Arc<AtomicU64>,
    dispatch_attempts_total: Arc<AtomicU64>,
    dispatch_failures_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            operations_total: Arc::new(AtomicU64::new(0)),
            operation_errors_total: Arc::new(AtomicU64::new(0)),
            dispatch_attempts_total: Arc::new(AtomicU64::new(0)),
            dispatch_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a completed service operation.
    pub fn track_operation(&self, operation: &str, duration_ms: u128, success: bool) {
        self.operations_total.fetch_add(1, Ordering::Relaxed);

        if !success {
            self.operation_errors_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            operation = %operation,
            duration_ms = duration_ms,
            success = success,
            "Operation completed"
        );
    }

    /// Track a hand-off to the mail transport.
    pub fn track_dispatch(&self, success: bool) {
        self.dispatch_attempts_total.fetch_add(1, Ordering::Relaxed);

        if !success {
            self.dispatch_failures_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get the total number of operations.
    pub fn operations_total(&self) -> u64 {
        self.operations_total.load(Ordering::Relaxed)
    }

    /// Get the total number of failed operations.
    pub fn operation_errors_total(&self) -> u64 {
        self.operation_errors_total.load(Ordering::Relaxed)
    }

    /// Get the total number of dispatch attempts.
    pub fn dispatch_attempts_total(&self) -> u64 {
        self.dispatch_attempts_total.load(Ordering::Relaxed)
    }

    /// Get the total number of failed dispatch attempts.
    pub fn dispatch_failures_total(&self) -> u64 {
        self.dispatch_failures_total.load(Ordering::Relaxed)
    }

    /// Get the operation error rate (0.0 to 1.0).
    pub fn error_rate(&self) -> f64 {
        let errors = self.operation_errors_total() as f64;
        let total = self.operations_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            errors / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Operations: {}\n\
             Operation Errors: {} ({:.2}% error rate)\n\
             Dispatch Attempts: {}\n\
             Dispatch Failures: {}",
            self.operations_total(),
            self.operation_errors_total(),
            self.error_rate() * 100.0,
            self.dispatch_attempts_total(),
            self.dispatch_failures_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer with a specific status and return the elapsed
    /// time in milliseconds.
    ///
    /// Only logs at debug level; callers report failures themselves.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            success = success,
            "Operation finished"
        );

        duration_ms
    }
}
