//! # Diagnostic Orchestrator
//!
//! Sequences the probe primitives over the target catalog:
//!
//! `Start → Interfaces → Bandwidth → Geolocation → Reachability → Latency → HttpChecks → Finalize`
//!
//! Stages only ever advance and are never retried. Every probe is isolated:
//! an error becomes exactly one Fail entry and iteration carries on with the
//! next port, URL or stage. The [`Run`] is passed into each stage and handed
//! back out, so nothing is shared through ambient state.

use std::fmt;
use std::sync::Arc;

use netcheck_common::config::{Config, ProbeSettings};
use netcheck_common::error::ProbeError;
use netcheck_common::network::target::TargetCatalog;
use netcheck_common::run::{LogEntry, Run, Severity};
use tracing::{info, warn};

use crate::network::{http, tcp};
use crate::ports::{BandwidthMeter, GeoLocator, InterfaceSource, Mailer, RunObserver, StatusFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Start,
    Interfaces,
    Bandwidth,
    Geolocation,
    Reachability,
    Latency,
    HttpChecks,
    Finalize,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Start => Some(Stage::Interfaces),
            Stage::Interfaces => Some(Stage::Bandwidth),
            Stage::Bandwidth => Some(Stage::Geolocation),
            Stage::Geolocation => Some(Stage::Reachability),
            Stage::Reachability => Some(Stage::Latency),
            Stage::Latency => Some(Stage::HttpChecks),
            Stage::HttpChecks => Some(Stage::Finalize),
            Stage::Finalize => None,
        }
    }

    /// Console section title. `Start` uses the report title instead and
    /// `Finalize` prints nothing.
    pub fn header(self) -> Option<&'static str> {
        match self {
            Stage::Start | Stage::Finalize => None,
            Stage::Interfaces => Some("LOCAL NETWORK INTERFACES"),
            Stage::Bandwidth => Some("SPEED TEST RESULTS"),
            Stage::Geolocation => Some("GEOLOCATION AND PUBLIC IP"),
            Stage::Reachability => Some("SERVICE CONNECTIVITY TEST"),
            Stage::Latency => Some("LATENCY TESTS"),
            Stage::HttpChecks => Some("TEST URL CONNECTIONS"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Completion tracking for the latency stage.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    completed: usize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { completed: 0, total }
    }

    /// Marks one more probe as done and returns the new percentage.
    pub fn advance(&mut self) -> u8 {
        self.completed = (self.completed + 1).min(self.total);
        self.percent()
    }

    /// `floor(100 * completed / total)`; an empty stage counts as done.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (100 * self.completed / self.total) as u8
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// The external collaborators a run talks to.
pub struct Collaborators {
    pub interfaces: Box<dyn InterfaceSource>,
    pub bandwidth: Box<dyn BandwidthMeter>,
    pub geo: Box<dyn GeoLocator>,
    pub http: Box<dyn StatusFetcher>,
    pub mailer: Box<dyn Mailer>,
}

pub struct Diagnostics<'a> {
    title: &'a str,
    owner: Option<&'a str>,
    catalog: &'a TargetCatalog,
    probes: &'a ProbeSettings,
    collaborators: &'a Collaborators,
    observer: Arc<dyn RunObserver>,
}

impl<'a> Diagnostics<'a> {
    pub fn new(cfg: &'a Config, collaborators: &'a Collaborators, observer: Arc<dyn RunObserver>) -> Self {
        Self {
            title: &cfg.title,
            owner: cfg.owner.as_deref(),
            catalog: &cfg.catalog,
            probes: &cfg.probes,
            collaborators,
            observer,
        }
    }

    /// Drives every stage in order and returns the completed run.
    pub async fn run(&self, mut run: Run) -> Run {
        let mut stage: Stage = Stage::Start;
        loop {
            info!("stage {stage} started");
            self.observer.stage_started(stage);
            run = self.run_stage(stage, run).await;

            match stage.next() {
                Some(next) => stage = next,
                None => break,
            }
        }
        run
    }

    async fn run_stage(&self, stage: Stage, run: Run) -> Run {
        match stage {
            Stage::Start => self.preamble(run),
            Stage::Interfaces => self.interfaces(run),
            Stage::Bandwidth => self.bandwidth(run).await,
            Stage::Geolocation => self.geolocation(run).await,
            Stage::Reachability => self.reachability(run).await,
            Stage::Latency => self.latency(run).await,
            Stage::HttpChecks => self.http_checks(run).await,
            Stage::Finalize => self.finalize(run),
        }
    }

    fn preamble(&self, mut run: Run) -> Run {
        self.record(&mut run, LogEntry::info(format!("Version {}", env!("CARGO_PKG_VERSION"))));
        if let Some(owner) = self.owner {
            self.record(&mut run, LogEntry::info(format!("Property of {owner}")));
        }
        info!("{} on {}", self.title, run.hostname);
        run
    }

    fn interfaces(&self, mut run: Run) -> Run {
        match self.collaborators.interfaces.ipv4_addresses() {
            Ok(addresses) => {
                for address in addresses {
                    self.record(&mut run, address.to_entry());
                }
            }
            Err(e) => {
                warn!("interface enumeration failed: {e:#}");
                let err = ProbeError::lookup(&e);
                self.record(&mut run, LogEntry::fail(format!("Interface enumeration failed: {err}")));
            }
        }
        run
    }

    async fn bandwidth(&self, mut run: Run) -> Run {
        match self.collaborators.bandwidth.measure().await {
            Ok(bandwidth) => {
                for entry in bandwidth.entries() {
                    self.record(&mut run, entry);
                }
            }
            Err(e) => {
                warn!("bandwidth measurement failed: {e:#}");
                let err = ProbeError::lookup(&e);
                self.record(&mut run, LogEntry::fail(format!("Speedtest failed: {err}")));
            }
        }
        run
    }

    async fn geolocation(&self, mut run: Run) -> Run {
        match self.collaborators.geo.locate().await {
            Ok(location) => {
                for entry in location.entries() {
                    self.record(&mut run, entry);
                }
            }
            Err(e) => {
                warn!("geolocation lookup failed: {e:#}");
                let err = ProbeError::lookup(&e);
                self.record(&mut run, LogEntry::fail(format!("Geolocation lookup failed: {err}")));
            }
        }
        run
    }

    async fn reachability(&self, mut run: Run) -> Run {
        for (host, port) in self.catalog.endpoints() {
            let outcome = tcp::probe_reachability(host, port, self.probes.connect_timeout).await;
            self.record(&mut run, outcome.to_entry());
        }
        run
    }

    async fn latency(&self, mut run: Run) -> Run {
        let mut progress = Progress::new(self.catalog.total_ports());

        for (host, port) in self.catalog.endpoints() {
            let outcome = tcp::probe_latency(
                host,
                port,
                self.probes.latency_runs,
                self.probes.latency_timeout,
            )
            .await;
            self.record(&mut run, outcome.to_entry());

            let percent: u8 = progress.advance();
            self.observer
                .progress(progress.completed(), progress.total(), percent);
        }
        run
    }

    async fn http_checks(&self, mut run: Run) -> Run {
        for url in self.catalog.urls() {
            let outcome = http::probe_url(self.collaborators.http.as_ref(), url).await;
            self.record(&mut run, outcome.to_entry());
        }
        run
    }

    fn finalize(&self, run: Run) -> Run {
        info!(
            ok = run.count(Severity::Ok),
            fail = run.count(Severity::Fail),
            info = run.count(Severity::Info),
            "diagnostics complete"
        );
        run
    }

    pub(crate) fn record(&self, run: &mut Run, entry: LogEntry) {
        record(self.observer.as_ref(), run, entry);
    }
}

/// Echoes an entry to the observer and appends it to the run.
pub(crate) fn record(observer: &dyn RunObserver, run: &mut Run, entry: LogEntry) {
    observer.entry_added(&entry);
    run.push(entry);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
