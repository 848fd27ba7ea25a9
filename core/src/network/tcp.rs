use std::net::SocketAddr;
use std::time::{Duration, Instant};

use netcheck_common::error::ProbeError;
use netcheck_common::network::outcome::ProbeOutcome;
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;
use tracing::debug;

/// One TCP connect/close attempt.
///
/// The stream is dropped as soon as the handshake completes, which closes it.
pub async fn probe_reachability(host: &str, port: u16, connect_timeout: Duration) -> ProbeOutcome {
    match timeout(connect_timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeOutcome::reachable(host, port)
        }
        Ok(Err(e)) => {
            debug!("{host}:{port} connect failed: {e}");
            ProbeOutcome::unreachable(host, port, ProbeError::connect(e))
        }
        Err(_elapsed) => {
            debug!("{host}:{port} connect timed out after {connect_timeout:?}");
            ProbeOutcome::unreachable(host, port, ProbeError::connect("timed out"))
        }
    }
}

/// Averages the handshake latency of `runs` independent connects.
pub async fn probe_latency(host: &str, port: u16, runs: usize, per_attempt: Duration) -> ProbeOutcome {
    match sample_latency(host, port, runs, per_attempt).await {
        Ok(samples) => ProbeOutcome::latency(host, port, average(&samples)),
        Err(e) => ProbeOutcome::latency_error(host, port, e),
    }
}

/// Times `runs` TCP handshakes against the first resolved address.
///
/// Attempts that fail or exceed `per_attempt` are recorded as `None`.
/// Only a failed name resolution is an error.
pub async fn sample_latency(
    host: &str,
    port: u16,
    runs: usize,
    per_attempt: Duration,
) -> Result<Vec<Option<Duration>>, ProbeError> {
    let addr: SocketAddr = resolve(host, port, per_attempt).await?;
    let mut samples: Vec<Option<Duration>> = Vec::with_capacity(runs);

    for attempt in 0..runs {
        let started: Instant = Instant::now();
        let sample = match timeout(per_attempt, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => Some(started.elapsed()),
            Ok(Err(_)) | Err(_) => None,
        };
        debug!("{host}:{port} handshake #{attempt}: {sample:?}");
        samples.push(sample);
    }

    Ok(samples)
}

/// Mean of the successful samples. Failed samples are left out rather than
/// counted as zero, and no samples at all yields `None`.
pub fn average(samples: &[Option<Duration>]) -> Option<Duration> {
    let valid: Vec<Duration> = samples.iter().flatten().copied().collect();
    if valid.is_empty() {
        return None;
    }
    let total: Duration = valid.iter().sum();
    Some(total / valid.len() as u32)
}

async fn resolve(host: &str, port: u16, limit: Duration) -> Result<SocketAddr, ProbeError> {
    let addrs = match timeout(limit, lookup_host((host, port))).await {
        Ok(Ok(addrs)) => addrs,
        Ok(Err(e)) => return Err(ProbeError::connect(e)),
        Err(_elapsed) => return Err(ProbeError::connect("name resolution timed out")),
    };
    prefer_ipv4(addrs)
        .ok_or_else(|| ProbeError::connect(format!("no addresses found for {host}")))
}

/// First IPv4 address, or the first address of any family if there is none.
pub fn prefer_ipv4(addrs: impl Iterator<Item = SocketAddr>) -> Option<SocketAddr> {
    let mut first: Option<SocketAddr> = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
