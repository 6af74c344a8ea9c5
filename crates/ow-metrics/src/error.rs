//! Metric sink error types.

use thiserror::Error;

/// Errors that can occur while setting up a metric sink.
///
/// Emission itself never fails from the caller's point of view; these
/// only surface at construction time.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid address {addr}: {message}")]
    Address { addr: String, message: String },
}

/// Convenience alias for metric sink results.
pub type MetricsResult<T> = Result<T, MetricsError>;
