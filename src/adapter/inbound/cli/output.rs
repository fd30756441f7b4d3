//! Terminal output formatting.
//!
//! Every helper honours the global output mode: styled text by default,
//! nothing but warnings and errors under `--quiet`, and one JSON object per
//! line under `--json`. JSON lines have the shape
//! `{"type": <kind>, "payload": <object>}`.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{json, Value};

/// How results reach the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Styled human-readable text.
    #[default]
    Text,
    /// Warnings and errors only.
    Quiet,
    /// One JSON object per line.
    Json,
}

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Selected from `--json` and `--quiet`.
    pub mode: Mode,
    /// 0 = normal, 1+ = increasingly verbose logging.
    pub verbose: u8,
}

impl OutputConfig {
    /// `--json` wins over `--quiet`.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        let mode = if json {
            Mode::Json
        } else if quiet {
            Mode::Quiet
        } else {
            Mode::Text
        };
        Self { mode, verbose }
    }
}

static OUTPUT: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    match cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn mode() -> Mode {
    current().mode
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match cell().write() {
        Ok(mut slot) => *slot = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Return whether JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

/// Return whether quiet mode is enabled.
#[must_use]
pub fn is_quiet() -> bool {
    mode() == Mode::Quiet
}

/// Return the `-v` count.
#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

fn json_line(kind: &str, payload: Value) -> String {
    json!({ "type": kind, "payload": payload }).to_string()
}

/// Print `payload` as a JSON line, or run `text` when regular output is on.
fn emit(kind: &str, payload: impl FnOnce() -> Value, text: impl FnOnce()) {
    match mode() {
        Mode::Json => println!("{}", json_line(kind, payload())),
        Mode::Quiet => {}
        Mode::Text => text(),
    }
}

/// Print the application name and version.
pub fn header(version: &str) {
    emit(
        "header",
        || json!({ "app": "cxscan", "version": version }),
        || println!("{} {}", "cxscan".bold(), version.dimmed()),
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        || json!({ "label": label, "value": value }),
        || println!("  {:<16} {}", label.dimmed(), value),
    );
}

/// Print a success message with a checkmark.
pub fn success(message: &str) {
    emit(
        "success",
        || json!({ "message": message }),
        || println!("  {} {}", "✓".green(), message),
    );
}

/// Print a warning. Shown even under `--quiet`.
pub fn warning(message: &str) {
    match mode() {
        Mode::Json => println!("{}", json_line("warning", json!({ "message": message }))),
        Mode::Quiet | Mode::Text => println!("  {} {}", "⚠".yellow(), message),
    }
}

/// Print an error to stderr in every mode.
pub fn error(message: &str) {
    match mode() {
        Mode::Json => eprintln!("{}", json_line("error", json!({ "message": message }))),
        Mode::Quiet | Mode::Text => eprintln!("  {} {}", "×".red(), message),
    }
}

/// Print a bold section title preceded by a blank line.
pub fn section(title: &str) {
    emit(
        "section",
        || json!({ "title": title }),
        || {
            println!();
            println!("{}", title.bold());
        },
    );
}

/// Print a dimmed note.
pub fn note(message: &str) {
    emit(
        "note",
        || json!({ "message": message }),
        || println!("  {}", message.dimmed()),
    );
}

/// Print pre-rendered text such as a table, indented.
///
/// Text mode only; structured data goes through [`report`].
pub fn lines(content: &str) {
    if mode() != Mode::Text {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a structured result as a JSON line. No-op outside JSON mode.
pub fn report(kind: &str, value: &impl Serialize) {
    if !is_json() {
        return;
    }
    match serde_json::to_value(value) {
        Ok(payload) => println!("{}", json_line(kind, payload)),
        Err(e) => error(&format!("failed to encode {kind}: {e}")),
    }
}

/// Braille spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a progress spinner, hidden unless in text mode.
pub fn spinner(message: &str) -> ProgressBar {
    if mode() != Mode::Text {
        let pb = ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(SPINNER_FRAMES)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &ProgressBar, message: &str) {
    match mode() {
        Mode::Json => {
            println!("{}", json_line("loaded", json!({ "message": message })));
            pb.finish_and_clear();
        }
        Mode::Quiet => pb.finish_and_clear(),
        Mode::Text => pb.finish_with_message(format!("{} {}", "✓".green(), message)),
    }
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    match mode() {
        Mode::Json => pb.finish_and_clear(),
        Mode::Quiet | Mode::Text => {
            pb.finish_with_message(format!("{} {}", "×".red(), message));
        }
    }
}

/// Cyan in text mode, plain otherwise.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if mode() == Mode::Text {
        value.cyan().to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins_over_quiet() {
        assert_eq!(OutputConfig::new(true, true, 0).mode, Mode::Json);
        assert_eq!(OutputConfig::new(false, true, 0).mode, Mode::Quiet);
        assert_eq!(OutputConfig::new(false, false, 2).mode, Mode::Text);
    }

    #[test]
    fn json_lines_wrap_payload() {
        let line = json_line("note", json!({ "message": "hi" }));
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "note");
        assert_eq!(value["payload"]["message"], "hi");
    }
}
