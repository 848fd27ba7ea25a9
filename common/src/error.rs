use std::path::PathBuf;

use thiserror::Error;

/// Failures that are recovered at the probe call site.
///
/// Each one ends up as exactly one entry in the severity log and never
/// crosses a stage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Refused, timed out or name resolution failed.
    #[error("{reason}")]
    ConnectFailure { reason: String },

    /// Every latency sample failed.
    #[error("No TCP response")]
    LatencyUnavailable,

    #[error("Status: {status}")]
    HttpUnexpectedStatus { status: String },

    #[error("timed out after {secs}s")]
    HttpTimeout { secs: u64 },

    #[error("{reason}")]
    HttpTransportError { reason: String },

    /// Bandwidth or geolocation collaborator failed.
    #[error("{reason}")]
    LookupFailure { reason: String },

    #[error("{reason}")]
    DeliveryFailure { reason: String },
}

impl ProbeError {
    pub fn connect(reason: impl ToString) -> Self {
        Self::ConnectFailure {
            reason: reason.to_string(),
        }
    }

    pub fn lookup(err: &anyhow::Error) -> Self {
        Self::LookupFailure {
            reason: format!("{err:#}"),
        }
    }

    pub fn delivery(err: &anyhow::Error) -> Self {
        Self::DeliveryFailure {
            reason: format!("{err:#}"),
        }
    }
}

/// The only conditions that abort a run: without the output files there is
/// nothing to render or deliver.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
