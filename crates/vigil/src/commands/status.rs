//! Fleet status command handler.

use std::sync::Arc;

use owo_colors::OwoColorize;
use serde::Serialize;
use vigil_core::{FleetSummary, SecuritySite, SiteEngine, SiteStatus};

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Status report as rendered by `vigil status`.
#[derive(Serialize)]
struct StatusReport {
    summary: FleetSummary,
    alerts: Vec<Arc<SecuritySite>>,
}

pub fn handle(engine: &SiteEngine, settings: &Settings) -> Result<(), CliError> {
    let report = StatusReport {
        summary: engine.summary(),
        alerts: engine.active_alerts(),
    };
    let out = output::render_single(
        &settings.output,
        &report,
        |r| render_report(r, settings.use_color),
        |r| r.summary.total.to_string(),
    );
    output::print_output(&out, settings.quiet);
    Ok(())
}

fn render_report(report: &StatusReport, use_color: bool) -> String {
    let s = &report.summary;
    let mut lines = vec![
        format!("Fleet: {} sites", s.total),
        format!(
            "  guarded {}   not_guarded {}   alerting {}   suspended {}",
            s.guarded, s.not_guarded, s.alerting, s.suspended
        ),
    ];

    if report.alerts.is_empty() {
        lines.push("Active alerts: none".into());
    } else {
        lines.push(format!("Active alerts: {}", report.alerts.len()));
        for site in &report.alerts {
            lines.push(alert_entry(site, use_color));
        }
    }
    lines.join("\n")
}

/// One active-alert line, emergencies in red, alarms in yellow.
fn alert_entry(site: &Arc<SecuritySite>, use_color: bool) -> String {
    let entry = format!("  #{}  {}  {}", site.id, site.status, site.address);
    if !use_color {
        return entry;
    }
    match site.status {
        SiteStatus::Emergency => entry.red().bold().to_string(),
        _ => entry.yellow().to_string(),
    }
}
