//! LogReader — filtered, fault-isolating journal queries.

use std::sync::Arc;

use ow_metrics::MetricSink;

use crate::decode;
use crate::error::JournalResult;
use crate::source::JournalSource;
use crate::types::{JournalFilter, LogRecord, QueryBound};

/// Reads kernel error entries from a journal source.
///
/// Every query carries the same `JournalFilter::kernel_errors()` filter so
/// that cursors stay valid from one call to the next.
pub struct LogReader<S> {
    source: S,
    filter: JournalFilter,
    metrics: Arc<dyn MetricSink>,
}

impl<S: JournalSource> LogReader<S> {
    pub fn new(source: S, metrics: Arc<dyn MetricSink>) -> Self {
        Self {
            source,
            filter: JournalFilter::kernel_errors(),
            metrics,
        }
    }

    /// The filter applied to every query.
    pub fn filter(&self) -> &JournalFilter {
        &self.filter
    }

    /// Sink receiving this reader's diagnostic counters.
    pub fn metrics(&self) -> &Arc<dyn MetricSink> {
        &self.metrics
    }

    /// Query and decode, reporting what went wrong.
    ///
    /// Records nothing; use `query` for the counted, never-failing variant.
    pub async fn try_query(&self, bound: &QueryBound) -> JournalResult<Vec<LogRecord>> {
        let output = self.source.fetch(&self.filter, bound).await?;
        decode::parse_output(&output)
    }

    /// Query and decode, returning an empty batch on any failure.
    ///
    /// Failures are logged and counted under `oom.errors.query.*`.
    pub async fn query(&self, bound: &QueryBound) -> Vec<LogRecord> {
        match self.try_query(bound).await {
            Ok(records) => records,
            Err(e) => {
                if e.is_decode() {
                    tracing::error!(error = %e, %bound, "failed to decode journal output");
                } else {
                    tracing::error!(error = %e, %bound, "journal query failed");
                }
                self.metrics.increment(e.metric_name(), &[]);
                Vec::new()
            }
        }
    }
}
