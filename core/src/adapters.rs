//! Concrete implementations of the [`ports`](crate::ports) that talk to the
//! real network.

pub mod geo;
pub mod smtp;
pub mod speed;

use netcheck_common::config::ProbeSettings;

use crate::diagnostics::Collaborators;
use crate::network::http::HttpStatusClient;
use crate::network::interface::SystemInterfaces;

impl Collaborators {
    /// Wires every port to its production adapter.
    pub fn live(probes: &ProbeSettings) -> anyhow::Result<Self> {
        Ok(Self {
            interfaces: Box::new(SystemInterfaces),
            bandwidth: Box::new(speed::HttpSpeedTest::new()?),
            geo: Box::new(geo::IpApiLocator::new()?),
            http: Box::new(HttpStatusClient::new(probes)?),
            mailer: Box::new(smtp::SmtpMailer),
        })
    }
}
