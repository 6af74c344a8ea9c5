//! Journal access for oomwatch.
//!
//! Provides a `JournalSource` abstraction over `journalctl` (mockable for
//! tests), a decoder for its one-JSON-object-per-line output, and the
//! `LogReader` that applies the fixed kernel-error filter and absorbs every
//! query or decode failure into a diagnostic counter.

pub mod decode;
pub mod error;
pub mod mock;
pub mod reader;
pub mod source;
pub mod types;

// Re-export key types for convenience
pub use error::{JournalError, JournalResult};
pub use mock::MockJournalSource;
pub use reader::LogReader;
pub use source::{JournalSource, JournalctlSource};
pub use types::{Cursor, JournalFilter, LogRecord, QueryBound};
