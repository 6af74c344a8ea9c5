//! DogStatsD sink — counters as UDP datagrams to a local agent.
//!
//! Built on `cadence`. Datagrams go out on a non-blocking socket; a full
//! buffer or an unreachable daemon drops the sample with a warning.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use cadence::{Counted, StatsdClient, UdpMetricSink};

use crate::config::StatsdConfig;
use crate::error::{MetricsError, MetricsResult};
use crate::sink::MetricSink;

pub struct StatsdSink {
    client: StatsdClient,
    target: SocketAddr,
}

impl StatsdSink {
    /// Create a sink sending to the daemon described by `config`.
    ///
    /// `config.tags` are attached to every counter.
    pub fn new(config: &StatsdConfig) -> MetricsResult<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let target = addr
            .to_socket_addrs()
            .map_err(|e| MetricsError::Address {
                addr: addr.clone(),
                message: e.to_string(),
            })?
            .next()
            .ok_or_else(|| MetricsError::Address {
                addr: addr.clone(),
                message: "no addresses resolved".to_string(),
            })?;

        let bind_addr = if target.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr).map_err(|e| MetricsError::Io(e.to_string()))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| MetricsError::Io(e.to_string()))?;
        let sink = UdpMetricSink::from(target, socket).map_err(|e| MetricsError::Io(e.to_string()))?;

        let builder = config
            .tags
            .iter()
            .fold(StatsdClient::builder("", sink), |b, tag| match tag.split_once(':') {
                Some((key, value)) => b.with_tag(key, value),
                None => b.with_tag_value(tag),
            });

        Ok(Self {
            client: builder.build(),
            target,
        })
    }

    /// Address datagrams are sent to.
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl MetricSink for StatsdSink {
    fn increment(&self, name: &str, tags: &[String]) {
        let builder = tags
            .iter()
            .fold(self.client.count_with_tags(name, 1_i64), |b, tag| {
                match tag.split_once(':') {
                    Some((key, value)) => b.with_tag(key, value),
                    None => b.with_tag_value(tag),
                }
            });
        if let Err(e) = builder.try_send() {
            tracing::warn!(error = %e, metric = name, "failed to send statsd datagram");
        }
    }
}
