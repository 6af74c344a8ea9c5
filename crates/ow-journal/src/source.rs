//! Journal source abstraction — run a filtered query and return raw output.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{JournalError, JournalResult};
use crate::types::{JournalFilter, QueryBound};

/// Default subprocess timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Abstraction for the external journal query mechanism.
///
/// Enables mocking for tests. Returns the raw one-JSON-object-per-line
/// output; decoding is the reader's job.
#[async_trait]
pub trait JournalSource: Send + Sync {
    /// Run a query restricted by `filter` and `bound`.
    async fn fetch(&self, filter: &JournalFilter, bound: &QueryBound) -> JournalResult<String>;
}

/// Full `journalctl` argument list for a query.
pub fn journalctl_args(filter: &JournalFilter, bound: &QueryBound) -> Vec<String> {
    let mut args = vec!["--output=json".to_string(), "--no-pager".to_string()];
    args.extend(filter.args());
    args.extend(bound.args());
    args
}

/// Queries the local journal by running `journalctl` as a child process.
pub struct JournalctlSource {
    program: String,
    timeout: Duration,
}

impl JournalctlSource {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for JournalctlSource {
    fn default() -> Self {
        Self::new("journalctl", DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl JournalSource for JournalctlSource {
    async fn fetch(&self, filter: &JournalFilter, bound: &QueryBound) -> JournalResult<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(journalctl_args(filter, bound)).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(JournalError::Spawn(format!("{}: {e}", self.program))),
            Err(_) => return Err(JournalError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(JournalError::Exit {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
