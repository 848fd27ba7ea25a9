//! # Report Renderer
//!
//! Turns a [`Run`] into a plain-text transcript and an HTML document, and
//! writes both next to each other on disk.
//!
//! Severity comes from the entry itself, never from its text. Entry text is
//! embedded into the HTML as-is unless [`RenderOptions::escape_html`] is set,
//! so probe output containing markup characters ends up in the document
//! verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use netcheck_common::config::RenderOptions;
use netcheck_common::error::RunError;
use netcheck_common::run::{LogEntry, Run};
use tracing::info;

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="es"><head><meta charset="UTF-8">
<title>Network Report</title>
<style>
body { font-family: Arial; background: #f9f9f9; padding: 20px; }
.OK { color: green; }
.FAIL { color: red; }
pre { background: #eee; padding: 10px; border-radius: 5px; }
</style></head><body>
<h1>Network Diagnostics Report</h1><pre>
"#;

const HTML_FOOTER: &str = "</pre></body></html>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub html: String,
}

pub fn render(run: &Run, options: RenderOptions) -> Rendered {
    Rendered {
        text: render_text(run.entries()),
        html: render_html(run.entries(), options),
    }
}

/// One line per entry, in log order.
pub fn render_text(entries: &[LogEntry]) -> String {
    entries.iter().map(|entry| format!("{entry}\n")).collect()
}

/// Tagged entries are wrapped in a span carrying the severity class.
/// Info entries are emitted unstyled.
pub fn render_html(entries: &[LogEntry], options: RenderOptions) -> String {
    let body: Vec<String> = entries
        .iter()
        .map(|entry| {
            let line: String = if options.escape_html {
                escape(&entry.to_string())
            } else {
                entry.to_string()
            };
            match entry.severity().css_class() {
                Some(class) => format!(r#"<span class="{class}">{line}</span>"#),
                None => line,
            }
        })
        .collect();

    format!("{HTML_HEAD}{}{HTML_FOOTER}", body.join("\n"))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Transcript and HTML paths sharing one basename:
/// `<hostname>_<report-name>_transcript_<DDMMYY_HH-MM>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub transcript: PathBuf,
    pub html: PathBuf,
}

impl ReportPaths {
    pub fn new(dir: &Path, run: &Run, report_name: &str) -> Self {
        let base: String = format!("{}_{}_transcript_{}", run.hostname, report_name, run.file_stamp());
        Self {
            transcript: dir.join(format!("{base}.txt")),
            html: dir.join(format!("{base}.html")),
        }
    }
}

pub fn prepare_output_dir(dir: &Path) -> Result<(), RunError> {
    fs::create_dir_all(dir).map_err(|source| RunError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn persist(paths: &ReportPaths, rendered: &Rendered) -> Result<(), RunError> {
    write(&paths.transcript, &rendered.text)?;
    write(&paths.html, &rendered.html)?;
    info!("reports written to {} and {}", paths.transcript.display(), paths.html.display());
    Ok(())
}

fn write(path: &Path, contents: &str) -> Result<(), RunError> {
    fs::write(path, contents).map_err(|source| RunError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
