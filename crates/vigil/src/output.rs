//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats go through serde, plain emits one value per line.
//! Streaming commands format journal appends through the helpers at the
//! bottom.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use vigil_core::{AlarmAlert, SystemEvent};

use crate::cli::{ColorMode, OutputFormat};

// ── Color resolution ─────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable items in the chosen format.
///
/// Table mode maps each item through `to_row`; plain mode calls `id_fn`
/// to emit one identifier per line for scripting.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table mode uses `detail_fn`, which returns a pre-formatted block;
/// single-item views don't go through `Tabled`.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.expect("serialization should not fail")
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

// ── Streaming helpers ────────────────────────────────────────────────

/// One journal append formatted for streaming output.
pub fn event_line(event: &SystemEvent, use_color: bool) -> String {
    let time = event.timestamp.format("%H:%M:%S");
    if use_color && event.kind.is_alerting() {
        format!("{time}  {}", event.message.red())
    } else {
        format!("{time}  {}", event.message)
    }
}

/// A raised alert formatted for streaming output.
pub fn alert_line(alert: &AlarmAlert, use_color: bool) -> String {
    let line = format!("ALERT  Site #{} is in {}", alert.site_id, alert.status);
    if use_color {
        line.red().bold().to_string()
    } else {
        line
    }
}

/// Confirmation line for a mutation, marked when it raised an alert.
pub fn transition_note(message: &str, alert: bool, use_color: bool) -> String {
    if !alert {
        return message.to_string();
    }
    if use_color {
        format!("{message} {}", "[ALERT]".red().bold())
    } else {
        format!("{message} [ALERT]")
    }
}
