//! OomScanner — incremental journal scan for kernel OOM kills.
//!
//! Owns the resume cursor. Construction pins the cursor to the current end
//! of the kernel error log; every `check` reads what came after it, moves
//! the cursor past each entry seen, and counts the OOM kills among them.

use std::sync::LazyLock;

use regex::Regex;

use ow_journal::{Cursor, JournalSource, LogReader, QueryBound};

/// Counter for each detected kill, tagged `pname:<process name>`.
pub const OOM_KILLED_METRIC: &str = "oom.killed";

/// Tail query returned more than the one entry asked for.
pub const INIT_TOO_MANY_METRIC: &str = "oom.errors.init.toomany";

/// Tail query returned an entry without `__CURSOR`.
pub const INIT_NO_CURSOR_METRIC: &str = "oom.errors.init.nocursor";

/// Scan returned an entry without `__CURSOR`.
pub const CHECK_NO_CURSOR_METRIC: &str = "oom.errors.check.nocursor";

// Does not match cgroup limit kills ("Memory cgroup out of memory: ..."),
// which use different wording.
static OOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Out of memory: Kill process (?P<pid>\d+) \((?P<pname>.*?)\) score (?P<score>.*?) or sacrifice child",
    )
    .unwrap()
});

/// A kernel OOM kill extracted from a journal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OomEvent {
    pub pid: u32,
    pub process_name: String,
    pub score: String,
}

impl OomEvent {
    /// Extract an event from a kernel message, if it reports an OOM kill.
    ///
    /// A pid that does not fit in `u32` is not a real pid; the message is
    /// treated as a non-match.
    pub fn parse(message: &str) -> Option<Self> {
        let caps = OOM_RE.captures(message)?;
        let pid = caps["pid"].parse().ok()?;
        Some(Self {
            pid,
            process_name: caps["pname"].to_string(),
            score: caps["score"].to_string(),
        })
    }

    /// Tag attached to the `oom.killed` counter.
    pub fn tag(&self) -> String {
        format!("pname:{}", self.process_name)
    }
}

/// Incremental OOM kill scanner.
///
/// `cursor` is `None` when the kernel error log had no usable tail at
/// startup; the next `check` then reads the whole retained journal.
pub struct OomScanner<S> {
    reader: LogReader<S>,
    cursor: Option<Cursor>,
}

impl<S: JournalSource> OomScanner<S> {
    /// Build a scanner positioned at the current end of the kernel error log.
    pub async fn new(reader: LogReader<S>) -> Self {
        let cursor = cursor_for_end_of_journal(&reader).await;
        match &cursor {
            Some(c) => tracing::info!(cursor = %c, "scan cursor established"),
            None => tracing::info!("scan cursor unknown, first check reads full history"),
        }
        Self { reader, cursor }
    }

    /// Current resume point.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn reader(&self) -> &LogReader<S> {
        &self.reader
    }

    /// Run one scan cycle.
    ///
    /// A failed query looks the same as an empty one here: nothing is
    /// counted and the cursor stays put.
    pub async fn check(&mut self) {
        let bound = match &self.cursor {
            Some(c) => QueryBound::After(c.clone()),
            None => QueryBound::All,
        };
        let records = self.reader.query(&bound).await;

        if records.is_empty() {
            tracing::debug!(%bound, "no new kernel error entries");
            return;
        }

        tracing::debug!(count = records.len(), %bound, "read kernel error entries");
        let metrics = self.reader.metrics();
        for record in records {
            // Advance whether or not this is an OOM.
            let Some(cursor) = record.cursor else {
                tracing::error!(entry = %record.message, "journal entry missing __CURSOR, skipped");
                metrics.increment(CHECK_NO_CURSOR_METRIC, &[]);
                continue;
            };
            self.cursor = Some(cursor);

            let Some(event) = OomEvent::parse(&record.message) else {
                continue;
            };
            tracing::info!(
                pid = event.pid,
                pname = %event.process_name,
                score = %event.score,
                timestamp = ?record.timestamp,
                "detected OOM kill"
            );
            metrics.increment(OOM_KILLED_METRIC, &[event.tag()]);
        }
    }
}

async fn cursor_for_end_of_journal<S: JournalSource>(reader: &LogReader<S>) -> Option<Cursor> {
    let mut entries = reader.query(&QueryBound::Tail(1)).await;
    match entries.len() {
        0 => {
            // Kernel has not logged an error yet.
            tracing::info!("kernel error log has no history yet");
            None
        }
        1 => {
            let entry = entries.pop()?;
            if entry.cursor.is_none() {
                tracing::error!("tail entry missing __CURSOR");
                reader.metrics().increment(INIT_NO_CURSOR_METRIC, &[]);
            }
            entry.cursor
        }
        n => {
            tracing::error!(count = n, "too many results for end-of-journal query");
            reader.metrics().increment(INIT_TOO_MANY_METRIC, &[]);
            None
        }
    }
}
