//! Site command handlers.

use std::sync::Arc;

use tabled::Tabled;
use vigil_core::{BulkEntry, SecuritySite, SiteEngine, SiteStatus, TransitionSource};

use crate::cli::{SitesArgs, SitesCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Last Activity")]
    last_activity: String,
}

impl From<&Arc<SecuritySite>> for SiteRow {
    fn from(s: &Arc<SecuritySite>) -> Self {
        Self {
            id: s.id,
            address: s.address.clone(),
            status: s.status.to_string(),
            battery: format!("{}%", s.battery),
            last_activity: s.last_activity.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[derive(Clone, serde::Serialize, Tabled)]
struct BulkLine {
    #[tabled(rename = "ID")]
    site_id: u32,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&BulkEntry> for BulkLine {
    fn from(entry: &BulkEntry) -> Self {
        match &entry.outcome {
            Ok(outcome) => Self {
                site_id: entry.site_id,
                result: "ok".into(),
                message: outcome.event.as_ref().map_or_else(
                    || format!("Site #{}: {}", entry.site_id, outcome.site.status.label()),
                    |event| event.message.clone(),
                ),
            },
            Err(err) => Self {
                site_id: entry.site_id,
                result: "not found".into(),
                message: err.to_string(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(engine: &SiteEngine, args: SitesArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List { status } => {
            let filter = status.as_deref().map(SiteStatus::parse).transpose()?;
            let snap = engine.snapshot();
            let sites: Vec<Arc<SecuritySite>> = snap
                .iter()
                .filter(|s| filter.is_none_or(|f| s.status == f))
                .cloned()
                .collect();
            let out = output::render_list(
                &settings.output,
                &sites,
                |s| SiteRow::from(s),
                |s| s.id.to_string(),
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        SitesCommand::Get { site } => {
            let record = engine.site(site)?;
            let out = output::render_single(&settings.output, &record, render_detail, |s| {
                s.id.to_string()
            });
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        SitesCommand::Set {
            site,
            status,
            as_client,
        } => transition(engine, site, SiteStatus::parse(&status)?, as_client, settings),

        SitesCommand::Arm { site, as_client } => {
            transition(engine, site, SiteStatus::Guarded, as_client, settings)
        }

        SitesCommand::Disarm { site, as_client } => {
            transition(engine, site, SiteStatus::NotGuarded, as_client, settings)
        }

        SitesCommand::Suspend { site } => {
            transition(engine, site, SiteStatus::Suspended, false, settings)
        }

        SitesCommand::Bulk {
            status,
            ids,
            as_client,
        } => {
            let status = SiteStatus::parse(&status)?;
            let report = engine.apply_bulk(&ids, status, source_of(as_client));
            let lines: Vec<BulkLine> = report.entries.iter().map(BulkLine::from).collect();
            let out = output::render_list(&settings.output, &lines, Clone::clone, |l| {
                l.site_id.to_string()
            });
            output::print_output(&out, settings.quiet);
            if !settings.quiet {
                eprintln!("{} applied, {} failed", report.succeeded(), report.failed());
            }
            Ok(())
        }

        SitesCommand::Battery { site, percent } => {
            let record = engine.set_battery(site, percent)?;
            if !settings.quiet {
                eprintln!("Site #{}: battery {}%", record.id, record.battery);
            }
            Ok(())
        }
    }
}

/// Apply one transition and print the journal message (or a silent-status
/// note for `suspended`), with an alert marker when one was raised.
fn transition(
    engine: &SiteEngine,
    site: u32,
    status: SiteStatus,
    as_client: bool,
    settings: &Settings,
) -> Result<(), CliError> {
    let outcome = engine.apply_transition(site, status, source_of(as_client))?;
    if !settings.quiet {
        let message = outcome.event.as_ref().map_or_else(
            || format!("Site #{site}: {}", status.label()),
            |event| event.message.clone(),
        );
        eprintln!(
            "{}",
            output::transition_note(&message, outcome.alert, settings.use_color)
        );
    }
    Ok(())
}

fn source_of(as_client: bool) -> TransitionSource {
    if as_client {
        TransitionSource::Client
    } else {
        TransitionSource::Admin
    }
}

/// Multi-line detail block for `sites get` in table mode.
fn render_detail(site: &Arc<SecuritySite>) -> String {
    format!(
        "Site #{}\n  Address:       {}\n  Status:        {} ({})\n  Battery:       {}%\n  Last activity: {}",
        site.id,
        site.address,
        site.status,
        site.status.label(),
        site.battery,
        site.last_activity.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
