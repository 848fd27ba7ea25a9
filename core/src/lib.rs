//! # Network Health Diagnostic Engine
//!
//! Drives an ordered set of heterogeneous checks against a static target
//! catalog and folds every outcome into a severity-tagged log.
//!
//! * **[`network`]**: probe primitives (TCP reachability, TCP handshake
//!   latency, HTTP status classification, interface enumeration).
//! * **[`diagnostics`]**: the stage machine that sequences the probes.
//! * **[`report`]**: renders a [`Run`](netcheck_common::run::Run) into a
//!   transcript and an HTML document and writes both to disk.
//! * **[`delivery`]**: hands the HTML report to a mail transport.
//! * **[`ports`]**: traits for the external collaborators, implemented in
//!   [`adapters`].
//! * **[`pipeline`]**: glues the above into one run.

pub mod adapters;
pub mod delivery;
pub mod diagnostics;
pub mod network;
pub mod pipeline;
pub mod ports;
pub mod report;
pub mod system;
