use serde::Deserialize;

/// DogStatsD sink configuration, loadable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsdConfig {
    /// Emit to a DogStatsD daemon. When false, increments are only logged.
    #[serde(default)]
    pub enabled: bool,
    /// Daemon host (default 127.0.0.1).
    #[serde(default = "default_host")]
    pub host: String,
    /// Daemon UDP port (default 8125).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Constant `key:value` tags appended to every metric.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8125
}

impl Default for StatsdConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
            tags: Vec::new(),
        }
    }
}
