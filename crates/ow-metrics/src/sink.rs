//! The `MetricSink` trait and a sink that only logs.

/// Abstraction for counter emission.
///
/// Enables mocking in tests without a metrics daemon. Implementations
/// must not block and must swallow their own delivery failures.
pub trait MetricSink: Send + Sync {
    /// Increment the counter `name` by one, tagged with `key:value` strings.
    fn increment(&self, name: &str, tags: &[String]);
}

/// Sink that reports each increment as a `tracing` event.
///
/// Used when no DogStatsD daemon is configured, so counters remain
/// visible in the agent's own log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MetricSink for TracingSink {
    fn increment(&self, name: &str, tags: &[String]) {
        tracing::info!(metric = name, tags = ?tags, "counter incremented");
    }
}
