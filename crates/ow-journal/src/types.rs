//! Core journal types: cursors, records, filters and query bounds.

use chrono::{DateTime, Utc};

// ── Cursor ────────────────────────────────────────────────────

/// Opaque journal position token (`__CURSOR`).
///
/// Never parsed; only handed back to the journal verbatim. Always
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a token, rejecting the empty string.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Log Record ────────────────────────────────────────────────

/// One decoded journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Position token. `None` only when the journal omitted `__CURSOR`,
    /// which consumers treat as a protocol error.
    pub cursor: Option<Cursor>,
    /// Kernel-reported text (empty when the entry carried no `MESSAGE`).
    pub message: String,
    /// Wall-clock time of the entry (None if absent or unparseable).
    pub timestamp: Option<DateTime<Utc>>,
}

// ── Filter ────────────────────────────────────────────────────

/// Field matches applied to every journal query.
///
/// Journal cursors are filter-sensitive: a cursor obtained under one filter
/// and replayed under another can skip or repeat entries. A reader must
/// therefore use the same filter for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalFilter {
    /// Restrict to system (not user) journals.
    pub system_only: bool,
    /// `FIELD=value` matches.
    pub matches: Vec<String>,
}

impl JournalFilter {
    /// Kernel-transport entries at error priority (3) from the system journal.
    pub fn kernel_errors() -> Self {
        Self {
            system_only: true,
            matches: vec!["_TRANSPORT=kernel".to_string(), "PRIORITY=3".to_string()],
        }
    }

    /// Render as `journalctl` arguments.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.matches.len() + 1);
        if self.system_only {
            args.push("--system".to_string());
        }
        args.extend(self.matches.iter().cloned());
        args
    }
}

// ── Query Bound ───────────────────────────────────────────────

/// Which slice of the filtered journal a query returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryBound {
    /// Every retained entry, oldest first.
    All,
    /// The `n` most recent entries.
    Tail(usize),
    /// Every entry strictly after the cursor, oldest first.
    After(Cursor),
}

impl QueryBound {
    /// Render as `journalctl` arguments.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::All => Vec::new(),
            Self::Tail(n) => vec!["-n".to_string(), n.to_string()],
            Self::After(cursor) => vec!["--after-cursor".to_string(), cursor.to_string()],
        }
    }
}

impl std::fmt::Display for QueryBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Tail(n) => write!(f, "tail({n})"),
            Self::After(cursor) => write!(f, "after({cursor})"),
        }
    }
}
