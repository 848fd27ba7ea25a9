use chrono::{DateTime, Local};
use netcheck_common::run::Run;
use tracing::warn;

const UNKNOWN_HOST: &str = "unknown-host";

pub fn hostname() -> String {
    match sys_info::hostname() {
        Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => UNKNOWN_HOST.to_string(),
        Err(e) => {
            warn!("cannot read hostname: {e}");
            UNKNOWN_HOST.to_string()
        }
    }
}

/// A fresh run stamped with this machine's hostname and the local time.
pub fn new_run() -> Run {
    let now: DateTime<Local> = Local::now();
    Run::new(hostname(), now)
}
