use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use netcheck_common::run::LogEntry;
use netcheck_core::diagnostics::Stage;
use netcheck_core::ports::RunObserver;

use crate::terminal::print;

const BAR_TEMPLATE: &str = "{bar:40.cyan/blue} {pos}/{len} {msg}";

/// Echoes every entry to the terminal as it is recorded and draws a progress
/// bar while the latency probes run.
pub struct ConsoleObserver {
    title: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleObserver {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bar: Mutex::new(None),
        }
    }

    fn with_bar_suspended(&self, f: impl FnOnce()) {
        match self.bar.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(bar) => bar.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn stage_started(&self, stage: Stage) {
        if stage != Stage::Latency {
            self.finish_bar();
        }

        match stage {
            Stage::Start => print::header(&self.title),
            other => {
                if let Some(title) = other.header() {
                    print::header(title);
                }
            }
        }
    }

    fn entry_added(&self, entry: &LogEntry) {
        self.with_bar_suspended(|| print::entry(entry));
    }

    fn progress(&self, completed: usize, total: usize, percent: u8) {
        let Ok(mut guard) = self.bar.lock() else {
            print::progress(percent);
            return;
        };

        let bar: &ProgressBar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        });

        bar.suspend(|| print::progress(percent));
        bar.set_position(completed as u64);
        bar.set_message(format!("{percent}%"));
    }
}
