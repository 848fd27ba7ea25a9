use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::network::target::TargetCatalog;

pub const DEFAULT_REPORT_NAME: &str = "BRS_GENERAL";
pub const DEFAULT_TITLE: &str = "BRS SERVICE GENERAL";

pub struct Config {
    /// Where the transcript and the HTML report are written.
    pub output_dir: PathBuf,
    /// Middle part of the report file names.
    pub report_name: String,
    /// Printed as the first header of the run.
    pub title: String,
    /// Adds a `Property of ...` line to the preamble.
    pub owner: Option<String>,
    pub catalog: TargetCatalog,
    pub probes: ProbeSettings,
    pub render: RenderOptions,
    pub delivery: Delivery,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            report_name: DEFAULT_REPORT_NAME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            owner: None,
            catalog: TargetCatalog::builtin(),
            probes: ProbeSettings::default(),
            render: RenderOptions::default(),
            delivery: Delivery::Disabled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connect_timeout: Duration,
    pub latency_runs: usize,
    pub latency_timeout: Duration,
    pub http_timeout: Duration,
    pub http_max_redirects: usize,
    pub user_agent: String,
    /// Skips TLS certificate verification for the HTTP status checks.
    ///
    /// Internal endpoints commonly present self-signed certificates, and a
    /// verification failure there would hide the status we want to see.
    pub accept_invalid_certs: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            latency_runs: 3,
            latency_timeout: Duration::from_secs(2),
            http_timeout: Duration::from_secs(10),
            http_max_redirects: 10,
            user_agent: "Mozilla/5.0".to_string(),
            accept_invalid_certs: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Escape `<`, `>`, `&` and quotes in entry text. Off by default, so
    /// probe text is embedded into the HTML report as-is.
    pub escape_html: bool,
}

/// How the finished report leaves the machine.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// Explicitly turned off; nothing is attempted.
    Disabled,
    /// Requested but missing settings. Still reported as a failed attempt.
    Incomplete { missing: Vec<&'static str> },
    Smtp(SmtpSettings),
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
}

impl SmtpSettings {
    pub const DEFAULT_SERVER: &'static str = "smtp.office365.com";
    pub const DEFAULT_PORT: u16 = 587;
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("subject", &self.subject)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smtp_debug_hides_password() {
        let smtp = SmtpSettings {
            server: SmtpSettings::DEFAULT_SERVER.into(),
            port: SmtpSettings::DEFAULT_PORT,
            user: "monitor@example.com".into(),
            password: "hunter2".into(),
            sender: "monitor@example.com".into(),
            recipient: "alerts@example.com".into(),
            subject: "Network Report".into(),
        };
        let printed = format!("{:?}", Delivery::Smtp(smtp));
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("smtp.office365.com"));
    }

    #[test]
    fn default_probe_settings() {
        let probes = ProbeSettings::default();
        assert_eq!(probes.connect_timeout, Duration::from_secs(3));
        assert_eq!(probes.latency_runs, 3);
        assert_eq!(probes.latency_timeout, Duration::from_secs(2));
        assert_eq!(probes.http_timeout, Duration::from_secs(10));
        assert!(probes.accept_invalid_certs);
    }
}
