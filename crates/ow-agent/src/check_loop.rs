//! Periodic scan driver.
//!
//! Invokes `OomScanner::check` at a fixed interval, one cycle at a time.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use ow_journal::JournalSource;

use crate::scanner::OomScanner;

/// Run the check loop, scanning every `interval`.
///
/// This function runs forever until the task is cancelled. A slow query
/// delays the next tick instead of queuing a burst of catch-up cycles.
pub async fn run<S: JournalSource>(scanner: &mut OomScanner<S>, interval: Duration) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the first tick (fires immediately).
    ticker.tick().await;

    loop {
        ticker.tick().await;
        scanner.check().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ow_journal::{LogReader, MockJournalSource};
    use ow_metrics::MockSink;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn loop_scans_on_each_tick() {
        let source = MockJournalSource::new();
        let sink = Arc::new(MockSink::new());
        let mut scanner = OomScanner::new(LogReader::new(source.clone(), sink.clone())).await;
        source.push_message("Out of memory: Kill process 10 (redis-server) score 880 or sacrifice child");

        let _ = time::timeout(Duration::from_secs(35), run(&mut scanner, Duration::from_secs(15))).await;

        // init + ticks at 15s and 30s
        assert_eq!(source.calls().len(), 3);
        assert_eq!(sink.count_tagged("oom.killed", "pname:redis-server"), 1);
    }
}
