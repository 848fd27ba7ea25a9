#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Local;
use netcheck_common::config::{Config, Delivery, SmtpSettings};
use netcheck_common::error::ProbeError;
use netcheck_common::network::interface::InterfaceAddress;
use netcheck_common::network::target::{Target, TargetCatalog};
use netcheck_common::run::{LogEntry, Run, Severity};
use netcheck_core::diagnostics::Collaborators;
use netcheck_core::pipeline::{self, Completed};
use netcheck_core::ports::{
    Bandwidth, BandwidthMeter, GeoLocation, GeoLocator, InterfaceSource, Mailer, ReportMail,
    RunObserver, SilentObserver, StatusFetcher,
};
use tempfile::TempDir;
use tokio::net::TcpListener;

struct Loopback;

impl InterfaceSource for Loopback {
    fn ipv4_addresses(&self) -> anyhow::Result<Vec<InterfaceAddress>> {
        Ok(vec![InterfaceAddress {
            name: "lo".into(),
            ip: Ipv4Addr::LOCALHOST,
            netmask: Ipv4Addr::new(255, 0, 0, 0),
        }])
    }
}

struct Offline;

#[async_trait]
impl BandwidthMeter for Offline {
    async fn measure(&self) -> anyhow::Result<Bandwidth> {
        Err(anyhow!("speed test server unreachable"))
    }
}

struct FixedGeo;

#[async_trait]
impl GeoLocator for FixedGeo {
    async fn locate(&self) -> anyhow::Result<GeoLocation> {
        Ok(GeoLocation {
            public_ip: "203.0.113.7".into(),
            fields: vec![("Country".into(), "Spain".into())],
        })
    }
}

struct Statuses;

#[async_trait]
impl StatusFetcher for Statuses {
    async fn fetch_status(&self, url: &str) -> Result<String, ProbeError> {
        match url {
            "https://portal.example.com" => Ok("302".into()),
            "https://missing.example.com" => Ok("404".into()),
            _ => Err(ProbeError::HttpTimeout { secs: 10 }),
        }
    }
}

#[derive(Default)]
struct CapturingMailer {
    sent: Mutex<Vec<ReportMail>>,
    reject: bool,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, _smtp: &SmtpSettings, mail: &ReportMail) -> anyhow::Result<()> {
        if self.reject {
            return Err(anyhow!("535 authentication failed"));
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

struct SharedMailer(Arc<CapturingMailer>);

#[async_trait]
impl Mailer for SharedMailer {
    async fn send(&self, smtp: &SmtpSettings, mail: &ReportMail) -> anyhow::Result<()> {
        self.0.send(smtp, mail).await
    }
}

#[derive(Default)]
struct EntryCounter {
    entries: Mutex<Vec<LogEntry>>,
    progress: Mutex<Vec<u8>>,
}

impl RunObserver for EntryCounter {
    fn entry_added(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }

    fn progress(&self, _completed: usize, _total: usize, percent: u8) {
        self.progress.lock().unwrap().push(percent);
    }
}

fn collaborators(mailer: Box<dyn Mailer>) -> Collaborators {
    Collaborators {
        interfaces: Box::new(Loopback),
        bandwidth: Box::new(Offline),
        geo: Box::new(FixedGeo),
        http: Box::new(Statuses),
        mailer,
    }
}

fn smtp() -> SmtpSettings {
    SmtpSettings {
        server: SmtpSettings::DEFAULT_SERVER.into(),
        port: SmtpSettings::DEFAULT_PORT,
        user: "monitor@example.com".into(),
        password: "not-a-real-password".into(),
        sender: "monitor@example.com".into(),
        recipient: "alerts@example.com".into(),
        subject: "Network Report from probe-01".into(),
    }
}

/// One listening port and one port nothing listens on.
async fn local_ports() -> (TcpListener, u16, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();

    let closed = {
        let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
        probe.local_addr().unwrap().port()
    };

    (listener, open, closed)
}

fn config(dir: &TempDir, open: u16, closed: u16, delivery: Delivery) -> Config {
    let mut cfg = Config {
        output_dir: dir.path().join("reports"),
        report_name: "EDGE".into(),
        catalog: TargetCatalog::new(
            vec![Target::new("127.0.0.1", &[open, closed])],
            vec![
                "https://portal.example.com".into(),
                "https://missing.example.com".into(),
                "https://slow.example.com".into(),
            ],
        ),
        delivery,
        ..Config::default()
    };
    cfg.probes.connect_timeout = Duration::from_millis(500);
    cfg.probes.latency_timeout = Duration::from_millis(500);
    cfg
}

fn texts(run: &Run, severity: Severity) -> Vec<String> {
    run.entries()
        .iter()
        .filter(|e| e.severity() == severity)
        .map(|e| e.text().to_string())
        .collect()
}

/// The full run against local listeners and fake collaborators: every stage
/// reports, failures stay local and both files land on disk.
#[tokio::test]
async fn full_run_writes_both_reports() {
    let dir = TempDir::new().unwrap();
    let (_listener, open, closed) = local_ports().await;
    let cfg = config(&dir, open, closed, Delivery::Disabled);
    let observer = Arc::new(EntryCounter::default());

    let completed: Completed = pipeline::execute(
        &cfg,
        Run::new("probe-01", Local::now()),
        &collaborators(Box::new(CapturingMailer::default())),
        observer.clone(),
    )
    .await
    .unwrap();

    let ok = texts(&completed.run, Severity::Ok);
    let fail = texts(&completed.run, Severity::Fail);
    let info = texts(&completed.run, Severity::Info);

    assert!(ok.contains(&format!("127.0.0.1:{open} CONNECTION OK")));
    assert!(fail.iter().any(|t| t.starts_with(&format!("127.0.0.1:{closed} CONNECTION KO ("))));
    assert!(ok.iter().any(|t| t.starts_with(&format!("127.0.0.1:{open} - Avg TCP Latency: "))));
    assert!(fail.contains(&format!("127.0.0.1:{closed} - No TCP response")));

    assert!(fail.iter().any(|t| t.starts_with("Speedtest failed: ")));
    assert!(info.contains(&"Public IP: 203.0.113.7".to_string()));
    assert!(info.contains(&"Interface: lo - IP: 127.0.0.1 - Netmask: 255.0.0.0".to_string()));

    assert!(ok.contains(&"https://portal.example.com CONNECTION OK (Status: 302)".to_string()));
    assert!(info.contains(&"https://missing.example.com REACHABLE (Status: 404 Not Found)".to_string()));
    assert!(fail.contains(&"https://slow.example.com TIMEOUT".to_string()));

    assert!(completed.paths.transcript.exists());
    assert!(completed.paths.html.exists());
    assert_eq!(*observer.progress.lock().unwrap(), vec![50, 100]);
    assert_eq!(observer.entries.lock().unwrap().len(), completed.run.len());
}

/// Files are written before the report-generated and delivery entries are
/// recorded, so those two lines only exist in memory.
#[tokio::test]
async fn persisted_transcript_precedes_delivery() {
    let dir = TempDir::new().unwrap();
    let (_listener, open, closed) = local_ports().await;
    let cfg = config(&dir, open, closed, Delivery::Disabled);

    let completed = pipeline::execute(
        &cfg,
        Run::new("probe-01", Local::now()),
        &collaborators(Box::new(CapturingMailer::default())),
        Arc::new(SilentObserver),
    )
    .await
    .unwrap();

    let on_disk = std::fs::read_to_string(&completed.paths.transcript).unwrap();
    assert_eq!(on_disk, completed.rendered.text);
    assert_eq!(on_disk.lines().count() + 2, completed.run.len());

    let tail: Vec<&LogEntry> = completed.run.entries().iter().rev().take(2).collect();
    assert_eq!(tail[0].text(), "Email delivery skipped.");
    assert!(tail[1].text().starts_with("Report generated: "));

    let name = completed.paths.html.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("probe-01_EDGE_transcript_"));
    assert!(name.ends_with(".html"));
}

#[tokio::test]
async fn html_report_is_mailed() {
    let dir = TempDir::new().unwrap();
    let (_listener, open, closed) = local_ports().await;
    let cfg = config(&dir, open, closed, Delivery::Smtp(smtp()));
    let mailer = Arc::new(CapturingMailer::default());

    let completed = pipeline::execute(
        &cfg,
        Run::new("probe-01", Local::now()),
        &collaborators(Box::new(SharedMailer(mailer.clone()))),
        Arc::new(SilentObserver),
    )
    .await
    .unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alerts@example.com");
    assert_eq!(sent[0].html, completed.rendered.html);

    let last = completed.run.entries().last().unwrap();
    assert_eq!(last.severity(), Severity::Ok);
    assert_eq!(last.text(), "Email sent successfully.");
}

#[tokio::test]
async fn delivery_failures_do_not_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let (_listener, open, closed) = local_ports().await;

    let rejecting = CapturingMailer {
        reject: true,
        ..CapturingMailer::default()
    };
    let cfg = config(&dir, open, closed, Delivery::Smtp(smtp()));
    let completed = pipeline::execute(
        &cfg,
        Run::new("probe-01", Local::now()),
        &collaborators(Box::new(rejecting)),
        Arc::new(SilentObserver),
    )
    .await
    .unwrap();
    let last = completed.run.entries().last().unwrap();
    assert_eq!(last.severity(), Severity::Fail);
    assert!(last.text().starts_with("Failed to send email: "));
    assert!(last.text().contains("535 authentication failed"));

    let incomplete = Delivery::Incomplete {
        missing: vec!["smtp password"],
    };
    let cfg = config(&dir, open, closed, incomplete);
    let completed = pipeline::execute(
        &cfg,
        Run::new("probe-01", Local::now()),
        &collaborators(Box::new(CapturingMailer::default())),
        Arc::new(SilentObserver),
    )
    .await
    .unwrap();
    let last = completed.run.entries().last().unwrap();
    assert_eq!(last.severity(), Severity::Fail);
    assert!(last.text().contains("SMTP settings incomplete, missing smtp password"));
}

#[tokio::test]
async fn unwritable_output_dir_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let cfg = Config {
        output_dir: blocker.join("reports"),
        catalog: TargetCatalog::default(),
        delivery: Delivery::Disabled,
        ..Config::default()
    };

    let result = pipeline::execute(
        &cfg,
        Run::new("probe-01", Local::now()),
        &collaborators(Box::new(CapturingMailer::default())),
        Arc::new(SilentObserver),
    )
    .await;

    assert!(result.is_err());
}
