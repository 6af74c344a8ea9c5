//! Mock journal source for testing — serves in-memory entries.
//!
//! Applies the same bound semantics as `journalctl` (tail, after-cursor,
//! everything) over an append-only list of entries, records every query,
//! and can be told to fail upcoming queries. Clones share state, so a test
//! can keep a handle while the reader owns another.

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{JournalError, JournalResult};
use crate::source::JournalSource;
use crate::types::{JournalFilter, QueryBound};

struct MockEntry {
    cursor: Option<String>,
    line: String,
}

#[derive(Default)]
struct Inner {
    entries: Vec<MockEntry>,
    failures: VecDeque<JournalError>,
    raw_outputs: VecDeque<String>,
    calls: Vec<(JournalFilter, QueryBound)>,
    next_seq: u64,
}

/// A mock journal holding pre-loaded kernel entries.
#[derive(Clone, Default)]
pub struct MockJournalSource {
    inner: Arc<Mutex<Inner>>,
}

impl MockJournalSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry with a generated cursor. Returns that cursor.
    pub fn push_message(&self, message: impl Into<String>) -> String {
        let message: String = message.into();
        let mut inner = self.inner.lock().unwrap();
        inner.next_seq += 1;
        let cursor = format!("s=5c1d6f;i={:x};b=0e8a;m=3f2;t=60ce;x=a1", inner.next_seq);
        let line = json!({
            "__CURSOR": cursor,
            "__REALTIME_TIMESTAMP": (1_705_312_800_000_000u64 + inner.next_seq * 1_000_000).to_string(),
            "PRIORITY": "3",
            "_TRANSPORT": "kernel",
            "SYSLOG_IDENTIFIER": "kernel",
            "MESSAGE": message,
        })
        .to_string();
        inner.entries.push(MockEntry {
            cursor: Some(cursor.clone()),
            line,
        });
        cursor
    }

    /// Append an entry with no `__CURSOR` field.
    pub fn push_without_cursor(&self, message: impl Into<String>) {
        let message: String = message.into();
        let line = json!({ "MESSAGE": message, "PRIORITY": "3" }).to_string();
        self.inner.lock().unwrap().entries.push(MockEntry { cursor: None, line });
    }

    /// Make the next query fail with `error`.
    pub fn fail_next(&self, error: JournalError) {
        self.inner.lock().unwrap().failures.push_back(error);
    }

    /// Make the next query return `output` verbatim, ignoring the bound.
    pub fn respond_raw_next(&self, output: impl Into<String>) {
        self.inner.lock().unwrap().raw_outputs.push_back(output.into());
    }

    /// Every query received, in order.
    pub fn calls(&self) -> Vec<(JournalFilter, QueryBound)> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// The most recent query received.
    pub fn last_call(&self) -> Option<(JournalFilter, QueryBound)> {
        self.inner.lock().unwrap().calls.last().cloned()
    }

    /// Number of entries currently in the journal.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A sample journal with mixed kernel errors, two of them OOM kills.
    pub fn with_kernel_sample() -> Self {
        let m = Self::new();
        m.push_message("EXT4-fs error (device sda1): ext4_find_entry:1455: inode #2: comm ls: reading directory lblock 0");
        m.push_message("Out of memory: Kill process 4211 (java) score 912 or sacrifice child");
        m.push_message("Memory cgroup out of memory: Killed process 999 (nginx)");
        m.push_message("usb 1-1: device descriptor read/64, error -71");
        m.push_message("Out of memory: Kill process 1234 (python) score 5 or sacrifice child");
        m
    }
}

#[async_trait]
impl JournalSource for MockJournalSource {
    async fn fetch(&self, filter: &JournalFilter, bound: &QueryBound) -> JournalResult<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push((filter.clone(), bound.clone()));

        if let Some(error) = inner.failures.pop_front() {
            return Err(error);
        }
        if let Some(output) = inner.raw_outputs.pop_front() {
            return Ok(output);
        }

        let selected: &[MockEntry] = match bound {
            QueryBound::All => &inner.entries,
            QueryBound::Tail(n) => {
                let start = inner.entries.len().saturating_sub(*n);
                &inner.entries[start..]
            }
            QueryBound::After(cursor) => {
                let pos = inner
                    .entries
                    .iter()
                    .position(|e| e.cursor.as_deref() == Some(cursor.as_str()))
                    .ok_or_else(|| JournalError::Exit {
                        status: "exit status: 1".to_string(),
                        stderr: "Failed to seek to cursor: Invalid argument".to_string(),
                    })?;
                &inner.entries[pos + 1..]
            }
        };

        Ok(selected
            .iter()
            .map(|e| e.line.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse_output;
    use crate::types::Cursor;

    fn filter() -> JournalFilter {
        JournalFilter::kernel_errors()
    }

    #[tokio::test]
    async fn mock_tail_returns_most_recent() {
        let source = MockJournalSource::with_kernel_sample();
        let out = source.fetch(&filter(), &QueryBound::Tail(1)).await.unwrap();
        let records = parse_output(&out).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].message.contains("(python)"));
    }

    #[tokio::test]
    async fn mock_after_cursor_is_exclusive() {
        let source = MockJournalSource::new();
        let first = source.push_message("one");
        source.push_message("two");
        source.push_message("three");

        let out = source
            .fetch(&filter(), &QueryBound::After(Cursor::new(first).unwrap()))
            .await
            .unwrap();
        let records = parse_output(&out).unwrap();
        let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn mock_unknown_cursor_fails() {
        let source = MockJournalSource::with_kernel_sample();
        let bound = QueryBound::After(Cursor::new("s=gone").unwrap());
        let err = source.fetch(&filter(), &bound).await.unwrap_err();
        assert!(matches!(err, JournalError::Exit { .. }));
    }

    #[tokio::test]
    async fn mock_injected_failure_is_one_shot() {
        let source = MockJournalSource::with_kernel_sample();
        source.fail_next(JournalError::Spawn("boom".into()));
        assert!(source.fetch(&filter(), &QueryBound::All).await.is_err());
        assert!(source.fetch(&filter(), &QueryBound::All).await.is_ok());
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let source = MockJournalSource::new();
        let handle = source.clone();
        handle.push_message("late arrival");
        assert_eq!(source.len(), 1);
    }
}
