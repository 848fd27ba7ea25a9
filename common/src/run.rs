//! # Severity Log
//!
//! The single source of truth for everything a diagnostic run reports.
//! Entries are appended in the order probes complete and are never removed
//! or rewritten, which keeps the transcript, the HTML report and the console
//! echo consistent with each other.

use std::fmt;

use chrono::{DateTime, Local};

/// Timestamp layout used in report file names (`DDMMYY_HH-MM`).
pub const FILE_STAMP_FORMAT: &str = "%d%m%y_%H-%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Ok,
    Fail,
}

impl Severity {
    /// Bracketed marker written in front of the entry text, if any.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Severity::Info => None,
            Severity::Ok => Some("[OK]"),
            Severity::Fail => Some("[FAIL]"),
        }
    }

    /// CSS class used by the HTML report. Info entries are unstyled.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Severity::Info => None,
            Severity::Ok => Some("OK"),
            Severity::Fail => Some("FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
    severity: Severity,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Ok)
    }

    pub fn fail(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Fail)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity.tag() {
            Some(tag) => write!(f, "{tag} {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// One complete execution of the diagnostic sequence.
#[derive(Debug, Clone)]
pub struct Run {
    pub hostname: String,
    pub started_at: DateTime<Local>,
    log: Vec<LogEntry>,
}

impl Run {
    pub fn new(hostname: impl Into<String>, started_at: DateTime<Local>) -> Self {
        Self {
            hostname: hostname.into(),
            started_at,
            log: Vec::new(),
        }
    }

    /// Appends an entry. There is deliberately no way to remove or edit one.
    pub fn push(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.log.iter().filter(|e| e.severity == severity).count()
    }

    pub fn file_stamp(&self) -> String {
        self.started_at.format(FILE_STAMP_FORMAT).to_string()
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
