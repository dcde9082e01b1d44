//! TCP connect reachability probe.
//!
//! Measures round-trip time as the duration of a TCP handshake. Unlike ICMP
//! this needs no raw-socket privileges.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::Instant;

use super::{ProbeReply, ReachabilityProbe};
use crate::config::{PROBE_ATTEMPTS, PROBE_PORT};
use crate::error_handling::ProbeError;

/// Reachability prober that times TCP handshakes to one port.
///
/// Each probe resolves the host once, then makes `attempts` sequential
/// connection attempts. The whole probe shares one deadline; each attempt gets
/// an equal slice of it. An attempt that is refused, exceeds its slice or
/// never starts because the deadline passed counts as lost.
#[derive(Debug, Clone)]
pub struct TcpReachabilityProbe {
    port: u16,
    attempts: u32,
}

impl TcpReachabilityProbe {
    pub fn new(port: u16, attempts: u32) -> Self {
        Self {
            port,
            attempts: attempts.max(1),
        }
    }

    async fn resolve(
        &self,
        host: &str,
        timeout: Duration,
        deadline: Instant,
    ) -> Result<SocketAddr, ProbeError> {
        let mut addrs = match tokio::time::timeout_at(deadline, lookup_host((host, self.port))).await
        {
            Ok(Ok(addrs)) => addrs,
            Ok(Err(e)) => {
                return Err(ProbeError::Unreachable {
                    host: host.to_string(),
                    reason: format!("DNS lookup failed: {e}"),
                })
            }
            Err(_) => {
                return Err(ProbeError::Timeout {
                    what: format!("DNS lookup for {host}"),
                    after: timeout,
                })
            }
        };
        addrs.next().ok_or_else(|| ProbeError::Unreachable {
            host: host.to_string(),
            reason: "DNS lookup returned no addresses".to_string(),
        })
    }

    /// Runs the connection attempts against `addr`, never past `deadline`.
    ///
    /// Returns the round-trip times of the attempts that connected.
    async fn attempt_all<F, Fut>(
        &self,
        host: &str,
        addr: SocketAddr,
        timeout: Duration,
        deadline: Instant,
        connect: F,
    ) -> Vec<f64>
    where
        F: Fn(SocketAddr) -> Fut,
        Fut: Future<Output = io::Result<()>>,
    {
        let slice = timeout / self.attempts;
        let mut round_trips = Vec::with_capacity(self.attempts as usize);
        for attempt in 1..=self.attempts {
            let start = Instant::now();
            if start >= deadline {
                log::debug!("{host} ({addr}) out of time before attempt {attempt}");
                break;
            }
            let attempt_deadline = (start + slice).min(deadline);
            match tokio::time::timeout_at(attempt_deadline, connect(addr)).await {
                Ok(Ok(())) => {
                    round_trips.push(start.elapsed().as_secs_f64() * 1000.0);
                }
                Ok(Err(e)) => {
                    log::debug!("{host} ({addr}) attempt {attempt} failed: {e}");
                }
                Err(_) => {
                    log::debug!("{host} ({addr}) attempt {attempt} timed out");
                }
            }
        }
        round_trips
    }
}

impl Default for TcpReachabilityProbe {
    fn default() -> Self {
        Self::new(PROBE_PORT, PROBE_ATTEMPTS)
    }
}

/// Reduces the answered attempts to a reply: mean RTT and percent lost.
fn summarize(host: &str, attempts: u32, round_trips: &[f64]) -> Result<ProbeReply, ProbeError> {
    if round_trips.is_empty() {
        return Err(ProbeError::Unreachable {
            host: host.to_string(),
            reason: format!("all {attempts} attempts lost"),
        });
    }

    let lost = (attempts as usize).saturating_sub(round_trips.len());
    let loss_percent = lost as f64 * 100.0 / f64::from(attempts);
    Ok(ProbeReply {
        time_ms: round_trips.iter().sum::<f64>() / round_trips.len() as f64,
        packet_loss: format!("{loss_percent:.3}"),
    })
}

#[async_trait]
impl ReachabilityProbe for TcpReachabilityProbe {
    async fn probe(&self, host: &str, timeout: Duration) -> Result<ProbeReply, ProbeError> {
        let deadline = Instant::now() + timeout;
        let addr = self.resolve(host, timeout, deadline).await?;

        let round_trips = self
            .attempt_all(host, addr, timeout, deadline, |addr| async move {
                TcpStream::connect(addr).await.map(|_stream| ())
            })
            .await;

        summarize(host, self.attempts, &round_trips)
    }
}
