//! # Probe Outcomes
//!
//! Every probe produces a [`ProbeOutcome`] before anything is formatted.
//! Keeping the outcome as data decouples probing from the wording of the
//! report and lets the orchestrator be tested without string matching.

use std::fmt;
use std::time::Duration;

use crate::error::ProbeError;
use crate::run::{LogEntry, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Reachability,
    Latency,
    HttpStatus,
}

/// What a probe was pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Socket { host: String, port: u16 },
    Url(String),
}

impl Endpoint {
    pub fn socket(host: impl Into<String>, port: u16) -> Self {
        Endpoint::Socket {
            host: host.into(),
            port,
        }
    }

    pub fn port(&self) -> Option<u16> {
        match self {
            Endpoint::Socket { port, .. } => Some(*port),
            Endpoint::Url(_) => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Socket { host, port } => write!(f, "{host}:{port}"),
            Endpoint::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub endpoint: Endpoint,
    pub kind: ProbeKind,
    pub severity: Severity,
    /// HTTP status code as text, `"000"` when nothing answered.
    pub status: Option<String>,
    pub measurement: Option<Duration>,
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    pub fn reachable(host: &str, port: u16) -> Self {
        Self {
            endpoint: Endpoint::socket(host, port),
            kind: ProbeKind::Reachability,
            severity: Severity::Ok,
            status: None,
            measurement: None,
            error: None,
        }
    }

    pub fn unreachable(host: &str, port: u16, error: ProbeError) -> Self {
        Self {
            endpoint: Endpoint::socket(host, port),
            kind: ProbeKind::Reachability,
            severity: Severity::Fail,
            status: None,
            measurement: None,
            error: Some(error),
        }
    }

    /// A latency result. `None` means every sample failed.
    pub fn latency(host: &str, port: u16, average: Option<Duration>) -> Self {
        let (severity, error) = match average {
            Some(_) => (Severity::Ok, None),
            None => (Severity::Fail, Some(ProbeError::LatencyUnavailable)),
        };
        Self {
            endpoint: Endpoint::socket(host, port),
            kind: ProbeKind::Latency,
            severity,
            status: None,
            measurement: average,
            error,
        }
    }

    /// The latency probe could not run at all (e.g. the name did not resolve).
    pub fn latency_error(host: &str, port: u16, error: ProbeError) -> Self {
        Self {
            endpoint: Endpoint::socket(host, port),
            kind: ProbeKind::Latency,
            severity: Severity::Fail,
            status: None,
            measurement: None,
            error: Some(error),
        }
    }

    pub fn http_status(url: &str, status: impl Into<String>, severity: Severity) -> Self {
        let status = status.into();
        let error = match severity {
            Severity::Fail => Some(ProbeError::HttpUnexpectedStatus {
                status: status.clone(),
            }),
            _ => None,
        };
        Self {
            endpoint: Endpoint::Url(url.to_string()),
            kind: ProbeKind::HttpStatus,
            severity,
            status: Some(status),
            measurement: None,
            error,
        }
    }

    pub fn http_error(url: &str, error: ProbeError) -> Self {
        Self {
            endpoint: Endpoint::Url(url.to_string()),
            kind: ProbeKind::HttpStatus,
            severity: Severity::Fail,
            status: None,
            measurement: None,
            error: Some(error),
        }
    }

    pub fn success(&self) -> bool {
        self.severity != Severity::Fail
    }

    /// Measurement in milliseconds, if one was taken.
    pub fn millis(&self) -> Option<f64> {
        self.measurement.map(|d| d.as_secs_f64() * 1_000.0)
    }

    pub fn to_entry(&self) -> LogEntry {
        LogEntry::new(self.describe(), self.severity)
    }

    fn describe(&self) -> String {
        let ep = &self.endpoint;
        match self.kind {
            ProbeKind::Reachability => match &self.error {
                None => format!("{ep} CONNECTION OK"),
                Some(e) => format!("{ep} CONNECTION KO ({e})"),
            },
            ProbeKind::Latency => match (&self.error, self.millis()) {
                (None, Some(ms)) => format!("{ep} - Avg TCP Latency: {ms:.2} ms"),
                (Some(ProbeError::LatencyUnavailable), _) | (None, None) => {
                    format!("{ep} - No TCP response")
                }
                (Some(e), _) => format!("{ep} - TCP latency check failed: {e}"),
            },
            ProbeKind::HttpStatus => match (&self.error, self.status.as_deref()) {
                (Some(ProbeError::HttpTimeout { .. }), _) => format!("{ep} TIMEOUT"),
                (_, Some("000")) => format!("{ep} NO RESPONSE (Status: 000)"),
                (_, Some("404")) if self.severity == Severity::Info => {
                    format!("{ep} REACHABLE (Status: 404 Not Found)")
                }
                (None, Some(status)) => format!("{ep} CONNECTION OK (Status: {status})"),
                (Some(ProbeError::HttpUnexpectedStatus { status }), _) => {
                    format!("{ep} CONNECTION KO (Status: {status})")
                }
                (Some(e), _) => format!("{ep} HTTP ERROR: {e}"),
                (None, None) => format!("{ep} NO RESPONSE (Status: 000)"),
            },
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
