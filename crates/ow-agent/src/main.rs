//! oomwatch agent — counts kernel OOM kills recorded in the systemd journal.
//!
//! Wires the journal reader, the OOM scanner and a metric sink into a
//! single binary that scans on a fixed interval until stopped.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ow_agent::check_loop;
use ow_agent::config::{AgentConfig, LogFormat};
use ow_agent::scanner::OomScanner;
use ow_journal::{JournalctlSource, LogReader};
use ow_metrics::{MetricSink, StatsdSink, TracingSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/oomwatch/agent.toml".to_string());

    let config = AgentConfig::from_file(&config_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        "ow-agent starting"
    );

    // ── Metric sink ─────────────────────────────────────────────
    let metrics: Arc<dyn MetricSink> = if config.statsd.enabled {
        let sink = StatsdSink::new(&config.statsd)?;
        tracing::info!(target_addr = %sink.target(), "statsd sink enabled");
        Arc::new(sink)
    } else {
        tracing::info!("statsd disabled, counters go to the log");
        Arc::new(TracingSink)
    };

    // ── Journal reader + scanner ────────────────────────────────
    let source = JournalctlSource::new(
        config.journal.journalctl_path.clone(),
        config.journal.timeout(),
    );
    let reader = LogReader::new(source, metrics);
    let mut scanner = OomScanner::new(reader).await;

    tracing::info!(
        interval_secs = config.check_interval_secs,
        "ow-agent ready"
    );

    tokio::select! {
        () = check_loop::run(&mut scanner, config.check_interval()) => {
            tracing::error!("check loop exited unexpectedly");
        }
        // Graceful shutdown on SIGINT
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("ow-agent stopped");
    Ok(())
}
