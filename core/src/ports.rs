//! # Outbound Ports
//!
//! Contracts for everything the diagnostic run needs from the outside world.
//! Concrete implementations live in [`crate::adapters`] and
//! [`crate::network`]; tests substitute their own.
//!
//! All collaborators report failure through `anyhow::Result` (or
//! [`ProbeError`] for the HTTP client). The orchestrator turns every error
//! into a single Fail entry, so an implementation never needs to worry about
//! aborting the run.

use async_trait::async_trait;

use netcheck_common::config::SmtpSettings;
use netcheck_common::error::ProbeError;
use netcheck_common::network::interface::InterfaceAddress;
use netcheck_common::run::LogEntry;

use crate::diagnostics::Stage;

/// Lists the IPv4 addresses configured on local interfaces.
pub trait InterfaceSource: Send + Sync {
    fn ipv4_addresses(&self) -> anyhow::Result<Vec<InterfaceAddress>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bandwidth {
    pub download_bps: f64,
    pub upload_bps: f64,
    pub ping_ms: f64,
}

impl Bandwidth {
    pub fn entries(&self) -> Vec<LogEntry> {
        vec![
            LogEntry::ok(format!("Download: {:.2} Mbps", self.download_bps / 1_000_000.0)),
            LogEntry::ok(format!("Upload: {:.2} Mbps", self.upload_bps / 1_000_000.0)),
            LogEntry::ok(format!("Ping: {:.2} ms", self.ping_ms)),
        ]
    }
}

#[async_trait]
pub trait BandwidthMeter: Send + Sync {
    async fn measure(&self) -> anyhow::Result<Bandwidth>;
}

/// Public address of this machine plus the geo fields reported for it,
/// already in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub public_ip: String,
    pub fields: Vec<(String, String)>,
}

impl GeoLocation {
    pub fn entries(&self) -> Vec<LogEntry> {
        let mut entries = vec![LogEntry::info(format!("Public IP: {}", self.public_ip))];
        entries.extend(
            self.fields
                .iter()
                .map(|(key, value)| LogEntry::info(format!("{key}: {value}"))),
        );
        entries
    }
}

#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> anyhow::Result<GeoLocation>;
}

/// Issues a GET and reports the final status code as three digits.
///
/// Anything that prevents a response (refused, DNS, TLS) is reported as
/// `Ok("000")`. Only a timeout or a request that cannot be built is an error.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch_status(&self, url: &str) -> Result<String, ProbeError>;
}

/// A rendered report ready to be mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMail {
    pub subject: String,
    pub sender: String,
    pub recipient: String,
    pub plain: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, smtp: &SmtpSettings, mail: &ReportMail) -> anyhow::Result<()>;
}

/// Receives run progress as it happens. Purely observational: nothing
/// reported here ends up in the persisted log beyond what the entries say.
pub trait RunObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}

    fn entry_added(&self, _entry: &LogEntry) {}

    /// Called after every latency probe.
    fn progress(&self, _completed: usize, _total: usize, _percent: u8) {}
}

pub struct SilentObserver;

impl RunObserver for SilentObserver {}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
