//! Shared test harness for E2E tests.
//!
//! Wires a `MockJournalSource` through a real `LogReader` and `OomScanner`
//! into a `MockSink`, exercising the same code paths as the agent binary.

use std::sync::Arc;

use ow_agent::OomScanner;
use ow_journal::{LogReader, MockJournalSource};
use ow_metrics::MockSink;

#[allow(dead_code)]
pub const OOM_KILLED: &str = "oom.killed";

/// Format a classic kernel OOM kill message.
#[allow(dead_code)]
pub fn oom_message(pid: u32, pname: &str, score: u32) -> String {
    format!("Out of memory: Kill process {pid} ({pname}) score {score} or sacrifice child")
}

/// End-to-end harness: journal mock + scanner + recording sink.
pub struct TestHarness {
    /// Shared handle to the journal the scanner reads.
    pub journal: MockJournalSource,
    /// Every counter the reader and scanner emitted.
    pub metrics: Arc<MockSink>,
    pub scanner: OomScanner<MockJournalSource>,
}

impl TestHarness {
    /// Start a scanner over `journal` as the agent would at boot.
    pub async fn start(journal: MockJournalSource) -> Self {
        let metrics = Arc::new(MockSink::new());
        let reader = LogReader::new(journal.clone(), metrics.clone());
        let scanner = OomScanner::new(reader).await;
        Self {
            journal,
            metrics,
            scanner,
        }
    }

    /// Start over a journal pre-loaded with mixed kernel errors.
    #[allow(dead_code)]
    pub async fn with_sample_data() -> Self {
        Self::start(MockJournalSource::with_kernel_sample()).await
    }

    /// Run one scan cycle.
    pub async fn check(&mut self) {
        self.scanner.check().await;
    }

    /// `oom.killed` increments tagged with `pname`.
    #[allow(dead_code)]
    pub fn kills_of(&self, pname: &str) -> usize {
        self.metrics.count_tagged(OOM_KILLED, &format!("pname:{pname}"))
    }
}
