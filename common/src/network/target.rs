//! # Target Catalog
//!
//! The fixed set of endpoints a diagnostic run probes.
//!
//! Targets are kept as an ordered list of `(host, ports)` pairs so that the
//! order in which they are probed, and therefore the order of the report,
//! is exactly the order they were declared in.

use std::fmt;

/// A host plus the TCP ports to probe on it.
///
/// Hosts may be DNS names or literal IPv4 addresses. Nothing is validated
/// beyond what the connect call itself enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub ports: Vec<u16>,
}

impl Target {
    pub fn new(host: impl Into<String>, ports: &[u16]) -> Self {
        Self {
            host: host.into(),
            ports: ports.to_vec(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ports: Vec<String> = self.ports.iter().map(u16::to_string).collect();
        write!(f, "{}:{}", self.host, ports.join(","))
    }
}

/// Read-only description of everything probed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetCatalog {
    targets: Vec<Target>,
    urls: Vec<String>,
}

impl TargetCatalog {
    pub fn new(targets: Vec<Target>, urls: Vec<String>) -> Self {
        Self { targets, urls }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Every `(host, port)` pair in declaration order.
    pub fn endpoints(&self) -> impl Iterator<Item = (&str, u16)> + '_ {
        self.targets
            .iter()
            .flat_map(|t| t.ports.iter().map(move |port| (t.host.as_str(), *port)))
    }

    /// `Σ ports across all targets`
    pub fn total_ports(&self) -> usize {
        self.targets.iter().map(|t| t.ports.len()).sum()
    }

    /// The catalog shipped with the tool.
    pub fn builtin() -> Self {
        let targets = vec![
            Target::new("ALNAZPRODEUWEDC.NMASUNO.COM", &[389, 636, 445]),
            Target::new("ALNAZPRODC02.NMASUNO.COM", &[389, 636, 445]),
            Target::new("ALNADAZ03.NMASUNO.COM", &[389, 636, 445]),
            Target::new("ALNPRODSQLGS02.NMASUNO.COM", &[1433, 1435]),
            Target::new("ALNPRODPRINTAZ0.NMASUNO.COM", &[445]),
            Target::new("ALNPRINTAZ02.NMASUNO.COM", &[445]),
            Target::new("ALNAZ1.NMASUNO.COM", &[445]),
            Target::new("ALNAZ2.NMASUNO.COM", &[445]),
            Target::new("ALNAZ3.NMASUNO.COM", &[445]),
            Target::new("ALNAZ4.NMASUNO.COM", &[445]),
            Target::new("ALNAZ5.NMASUNO.COM", &[445]),
            Target::new("ALNAZ7.NMASUNO.COM", &[445]),
            Target::new("ALANTRA2018.NMASUNO.COM", &[445]),
            Target::new("nmasuno.com", &[389, 636, 445]),
            Target::new("adam.alantra.com", &[4438]),
            Target::new("10.174.36.4", &[4441]),
            Target::new("ALNAPPZA02.NMASUNO.COM", &[8444, 8081]),
            Target::new("adsi.alantra.com", &[451, 453]),
        ];

        let urls = [
            "https://anisa.alantra.com",
            "https://enma.alantra.com",
            "https://vdr.alantra.com",
            "https://www.alantra.com",
            "https://www.google.com",
            "https://adsi.alantra.com:451",
            "https://adsi.alantra.com:453",
            "https://adaudit.alantra.com:8081",
            "https://adaudit.alantra.com:8444",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self::new(targets, urls)
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
