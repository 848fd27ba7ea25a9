use colored::*;
use netcheck_common::run::{LogEntry, Severity};
use tracing::info;

pub const PRINT_TARGET: &str = "netcheck::print";

const BORDER_PADDING: usize = 10;

#[macro_export]
macro_rules! nprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: "netcheck::print", raw_msg = msg);
}

/// Section header framed by a `#` border ten characters wider than the title.
pub fn header(title: &str) {
    let border: ColoredString = "#"
        .repeat(console::measure_text_width(title) + BORDER_PADDING)
        .magenta()
        .bold();

    print(&border.to_string());
    print(&title.cyan().bold().to_string());
    print(&border.to_string());
}

pub fn entry(entry: &LogEntry) {
    let line: String = entry.to_string();
    let colored: ColoredString = match entry.severity() {
        Severity::Ok => line.green(),
        Severity::Fail => line.red(),
        Severity::Info => line.normal(),
    };
    print(&colored.to_string());
}

pub fn progress(percent: u8) {
    print(&format!("Progress: {percent}%"));
}

pub fn summary(ok: usize, fail: usize, html: &str) {
    let ok: ColoredString = format!("{ok} OK").green().bold();
    let fail: ColoredString = format!("{fail} FAIL").red().bold();
    nprint!();
    print(&format!("Run complete: {ok}, {fail}. Report at {}", html.bold()));
}
