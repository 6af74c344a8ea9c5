//! Mock metric sink for testing without a metrics daemon.
//!
//! Records every increment for assertion in tests.

use std::sync::Mutex;

use crate::sink::MetricSink;

/// A recorded `increment` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedIncrement {
    pub name: String,
    pub tags: Vec<String>,
}

/// Mock implementation of the `MetricSink` trait.
///
/// Thread-safe via `Mutex` (fine for test contexts).
pub struct MockSink {
    increments: Mutex<Vec<RecordedIncrement>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            increments: Mutex::new(Vec::new()),
        }
    }

    /// Get all recorded increments, in emission order.
    pub fn increments(&self) -> Vec<RecordedIncrement> {
        self.increments.lock().unwrap().clone()
    }

    /// Number of increments recorded for `name`, regardless of tags.
    pub fn count(&self, name: &str) -> usize {
        self.increments
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.name == name)
            .count()
    }

    /// Number of increments recorded for `name` carrying `tag`.
    pub fn count_tagged(&self, name: &str, tag: &str) -> usize {
        self.increments
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.name == name && i.tags.iter().any(|t| t == tag))
            .count()
    }

    /// Total number of increments recorded.
    pub fn total(&self) -> usize {
        self.increments.lock().unwrap().len()
    }

    /// Clear all recorded state.
    pub fn reset(&self) {
        self.increments.lock().unwrap().clear();
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSink for MockSink {
    fn increment(&self, name: &str, tags: &[String]) {
        self.increments.lock().unwrap().push(RecordedIncrement {
            name: name.to_string(),
            tags: tags.to_vec(),
        });
    }
}
