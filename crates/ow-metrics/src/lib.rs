//! Metric emission for oomwatch.
//!
//! Counters are fire-and-forget: a sink never reports failure to the caller.
//! - `MetricSink` trait (mockable in tests)
//! - `StatsdSink` for DogStatsD over UDP
//! - `TracingSink` for hosts without a metrics daemon
//! - `MockSink` for recording increments in tests

pub mod config;
pub mod error;
pub mod mock;
pub mod sink;
pub mod statsd;

// Re-exports for convenience.
pub use config::StatsdConfig;
pub use error::{MetricsError, MetricsResult};
pub use mock::{MockSink, RecordedIncrement};
pub use sink::{MetricSink, TracingSink};
pub use statsd::StatsdSink;
