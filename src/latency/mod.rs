//! Round-trip latency measurement.
//!
//! One reachability probe per host, in order, reduced to an average round-trip
//! time and an average packet-loss percentage. The measurement is all-or-nothing:
//! a single failed host discards the whole result.

mod tcp;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error_handling::ProbeError;

pub use tcp::TcpReachabilityProbe;

/// Averaged latency over all probed hosts.
///
/// `Default` is the fallback reported when the measurement fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatencyResult {
    /// Mean round-trip time in milliseconds
    #[serde(rename = "avg")]
    pub average_millis: f64,
    /// Mean packet loss in percent (0-100)
    #[serde(rename = "loss")]
    pub average_loss_percent: f64,
}

/// Answer of one reachability probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReply {
    /// Round-trip time in milliseconds
    pub time_ms: f64,
    /// Packet loss as reported by the prober, e.g. `"0"`, `"25.000"`, `"100"`
    pub packet_loss: String,
}

/// Reachability prober for a single host.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Probes `host`, giving up after `timeout`.
    async fn probe(&self, host: &str, timeout: Duration) -> Result<ProbeReply, ProbeError>;
}

/// Parses a packet-loss string as an integer percentage.
///
/// Leading whitespace is ignored and parsing stops at the first non-digit, so
/// `"25.000"` is 25. A string without leading digits is rejected.
pub fn parse_packet_loss(raw: &str) -> Result<u32, ProbeError> {
    let trimmed = raw.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end]
        .parse::<u32>()
        .map_err(|_| ProbeError::InvalidPacketLoss(raw.to_string()))
}

/// Probes every host in order and averages the results.
///
/// # Errors
///
/// - `ProbeError::NoHosts` for an empty host list
/// - the first probe error encountered; remaining hosts are not probed
/// - `ProbeError::InvalidPacketLoss` if a loss figure cannot be parsed
pub async fn probe_latency<S: AsRef<str>>(
    prober: &dyn ReachabilityProbe,
    hosts: &[S],
    timeout: Duration,
) -> Result<LatencyResult, ProbeError> {
    if hosts.is_empty() {
        log::warn!("Latency probe skipped: no hosts configured");
        return Err(ProbeError::NoHosts);
    }

    let mut total_millis = 0.0;
    let mut total_loss = 0.0;
    for host in hosts {
        let host = host.as_ref();
        let reply = prober.probe(host, timeout).await.map_err(|e| {
            log::warn!("Latency probe of {} failed: {}", host, e);
            e
        })?;
        let loss = parse_packet_loss(&reply.packet_loss).map_err(|e| {
            log::warn!("Latency probe of {} returned unusable loss: {}", host, e);
            e
        })?;
        if !reply.time_ms.is_finite() {
            log::warn!("Latency probe of {} returned no round-trip time", host);
            return Err(ProbeError::Unreachable {
                host: host.to_string(),
                reason: "no round-trip time".to_string(),
            });
        }
        log::debug!("{}: {:.2}ms, {}% loss", host, reply.time_ms, loss);
        total_millis += reply.time_ms;
        total_loss += f64::from(loss);
    }

    let count = hosts.len() as f64;
    Ok(LatencyResult {
        average_millis: total_millis / count,
        average_loss_percent: total_loss / count,
    })
}
