//! Shared models for the network health diagnostic.
//!
//! * [`run`]: the append-only severity log and the [`run::Run`] aggregate.
//! * [`network`]: targets, the static catalog and probe outcomes.
//! * [`config`]: everything a run needs to know before it starts.
//! * [`error`]: recoverable probe failures and fatal run failures.

pub mod config;
pub mod error;
pub mod network;
pub mod run;
