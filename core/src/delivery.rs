//! # Delivery Adapter
//!
//! Mails the rendered HTML report. By the time this runs the report files
//! are already on disk, so a failed delivery only costs one Fail entry.

use netcheck_common::config::SmtpSettings;
use netcheck_common::error::ProbeError;
use netcheck_common::run::LogEntry;
use tracing::warn;

use crate::ports::{Mailer, ReportMail};

/// Plain-text fallback body for clients that do not render HTML.
pub const PLAIN_BODY: &str = "Your network diagnostics report is attached as HTML.";

impl ReportMail {
    pub fn new(smtp: &SmtpSettings, html: &str) -> Self {
        Self {
            subject: smtp.subject.clone(),
            sender: smtp.sender.clone(),
            recipient: smtp.recipient.clone(),
            plain: PLAIN_BODY.to_string(),
            html: html.to_string(),
        }
    }
}

pub async fn deliver(mailer: &dyn Mailer, smtp: &SmtpSettings, html: &str) -> LogEntry {
    let mail = ReportMail::new(smtp, html);
    match mailer.send(smtp, &mail).await {
        Ok(()) => LogEntry::ok("Email sent successfully."),
        Err(e) => {
            warn!("delivery to {} via {}:{} failed: {e:#}", smtp.recipient, smtp.server, smtp.port);
            delivery_failed(&ProbeError::delivery(&e))
        }
    }
}

pub fn delivery_failed(err: &ProbeError) -> LogEntry {
    LogEntry::fail(format!("Failed to send email: {err}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
