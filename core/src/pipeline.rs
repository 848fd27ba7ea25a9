//! One complete diagnostic run, end to end:
//! output directory → stages → render → persist → deliver.
//!
//! Only the output directory and the two report files can fail the run.

use std::sync::Arc;

use netcheck_common::config::{Config, Delivery};
use netcheck_common::error::{ProbeError, RunError};
use netcheck_common::run::{LogEntry, Run};
use tracing::info;

use crate::delivery;
use crate::diagnostics::{self, Collaborators, Diagnostics};
use crate::ports::RunObserver;
use crate::report::{self, Rendered, ReportPaths};

#[derive(Debug)]
pub struct Completed {
    /// Includes the entries recorded after the files were written.
    pub run: Run,
    pub rendered: Rendered,
    pub paths: ReportPaths,
}

pub async fn execute(
    cfg: &Config,
    run: Run,
    collaborators: &Collaborators,
    observer: Arc<dyn RunObserver>,
) -> Result<Completed, RunError> {
    report::prepare_output_dir(&cfg.output_dir)?;

    let mut run: Run = Diagnostics::new(cfg, collaborators, observer.clone())
        .run(run)
        .await;

    let rendered: Rendered = report::render(&run, cfg.render);
    let paths: ReportPaths = ReportPaths::new(&cfg.output_dir, &run, &cfg.report_name);
    report::persist(&paths, &rendered)?;

    let generated = LogEntry::info(format!("Report generated: {}", paths.html.display()));
    diagnostics::record(observer.as_ref(), &mut run, generated);

    let delivered: LogEntry = match &cfg.delivery {
        Delivery::Disabled => {
            info!("email delivery disabled");
            LogEntry::info("Email delivery skipped.")
        }
        Delivery::Incomplete { missing } => delivery::delivery_failed(&ProbeError::DeliveryFailure {
            reason: format!("SMTP settings incomplete, missing {}", missing.join(", ")),
        }),
        Delivery::Smtp(smtp) => {
            delivery::deliver(collaborators.mailer.as_ref(), smtp, &rendered.html).await
        }
    };
    diagnostics::record(observer.as_ref(), &mut run, delivered);

    Ok(Completed {
        run,
        rendered,
        paths,
    })
}
