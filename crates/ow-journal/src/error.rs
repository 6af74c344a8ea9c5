//! Journal query error types.

use std::time::Duration;

use thiserror::Error;

/// Counter incremented when the query mechanism fails to produce output.
pub const QUERY_FAILURE_METRIC: &str = "oom.errors.query.failure";

/// Counter incremented when query output cannot be decoded.
pub const QUERY_DECODE_METRIC: &str = "oom.errors.query.decodefail";

/// Errors that can occur while querying the journal.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to run journalctl: {0}")]
    Spawn(String),

    #[error("journalctl timed out after {0:?}")]
    Timeout(Duration),

    #[error("journalctl exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("decode error on line {line}: {message}")]
    Decode { line: usize, message: String },
}

impl JournalError {
    /// Whether the query ran but its output was malformed.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Diagnostic counter for this failure.
    ///
    /// Spawn errors and timeouts count as query failures, same as a
    /// non-zero exit.
    pub fn metric_name(&self) -> &'static str {
        if self.is_decode() {
            QUERY_DECODE_METRIC
        } else {
            QUERY_FAILURE_METRIC
        }
    }
}

/// Convenience alias for journal results.
pub type JournalResult<T> = Result<T, JournalError>;
