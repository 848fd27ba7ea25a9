use std::sync::Arc;

use netcheck_common::config::Config;
use netcheck_common::run::{Run, Severity};
use netcheck_core::diagnostics::Collaborators;
use netcheck_core::pipeline::{self, Completed};
use netcheck_core::system;
use tracing::debug;

use crate::commands::RunArgs;
use crate::terminal::observer::ConsoleObserver;
use crate::terminal::print;

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let run: Run = system::new_run();
    let cfg: Config = args.into_config(&run.hostname);
    debug!("delivery: {:?}", cfg.delivery);

    let collaborators: Collaborators = Collaborators::live(&cfg.probes)?;
    let observer = Arc::new(ConsoleObserver::new(cfg.title.clone()));

    let completed: Completed = pipeline::execute(&cfg, run, &collaborators, observer).await?;

    print::summary(
        completed.run.count(Severity::Ok),
        completed.run.count(Severity::Fail),
        &completed.paths.html.display().to_string(),
    );
    Ok(())
}
