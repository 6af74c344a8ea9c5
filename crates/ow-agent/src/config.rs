//! Agent configuration, loadable from TOML.

use std::time::Duration;

use serde::Deserialize;

use ow_metrics::StatsdConfig;

/// Top-level configuration for the agent.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Seconds between scan cycles.
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Journal query settings.
    #[serde(default)]
    pub journal: JournalConfig,
    /// DogStatsD settings. Disabled by default; counters are then logged.
    #[serde(default)]
    pub statsd: StatsdConfig,
}

/// Output format for the agent's own logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// How `journalctl` is invoked.
#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    /// Path or name of the `journalctl` binary.
    #[serde(default = "default_journalctl_path")]
    pub journalctl_path: String,
    /// Query timeout in seconds. A timed-out query counts as failed.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            journalctl_path: default_journalctl_path(),
            timeout_secs: default_timeout(),
        }
    }
}

impl JournalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_check_interval() -> u64 {
    15
}

fn default_journalctl_path() -> String {
    "journalctl".to_string()
}

fn default_timeout() -> u64 {
    5
}

impl AgentConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot use.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.check_interval_secs == 0 {
            anyhow::bail!("check_interval_secs must be greater than zero");
        }
        if self.journal.timeout_secs == 0 {
            anyhow::bail!("journal.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty_config() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config.check_interval_secs, 15);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.journal.journalctl_path, "journalctl");
        assert_eq!(config.journal.timeout(), Duration::from_secs(5));
        assert!(!config.statsd.enabled);
        assert_eq!(config.statsd.port, 8125);
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
check_interval_secs = 30
log_format = "pretty"

[journal]
journalctl_path = "/usr/bin/journalctl"
timeout_secs = 10

[statsd]
enabled = true
host = "localhost"
port = 8126
tags = ["env:staging"]
"#;
        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.check_interval(), Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.journal.journalctl_path, "/usr/bin/journalctl");
        assert_eq!(config.journal.timeout_secs, 10);
        assert!(config.statsd.enabled);
        assert_eq!(config.statsd.host, "localhost");
        assert_eq!(config.statsd.tags, vec!["env:staging"]);
    }

    #[test]
    fn unknown_log_format_rejected() {
        assert!(toml::from_str::<AgentConfig>(r#"log_format = "xml""#).is_err());
    }

    #[test]
    fn zero_interval_rejected() {
        let config: AgentConfig = toml::from_str("check_interval_secs = 0").unwrap();
        assert!(config.validate().is_err());
        let config: AgentConfig = toml::from_str("[journal]\ntimeout_secs = 0").unwrap();
        assert!(config.validate().is_err());
        let config: AgentConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_is_error() {
        assert!(AgentConfig::from_file("/nonexistent/oomwatch.toml").is_err());
    }
}
