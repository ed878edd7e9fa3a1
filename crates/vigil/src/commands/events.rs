//! Event journal command handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tabled::Tabled;
use vigil_core::{SiteEngine, SystemEvent};

use crate::cli::{EventsArgs, EventsCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Arc<SystemEvent>> for EventRow {
    fn from(e: &Arc<SystemEvent>) -> Self {
        Self {
            id: e.id,
            time: fmt_time(&e.timestamp),
            kind: e.kind.to_string(),
            source: e.source.to_string(),
            message: e.message.clone(),
        }
    }
}

fn fmt_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(engine: &SiteEngine, args: EventsArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        EventsCommand::List { limit } => {
            let events = engine.events(limit);
            let out = output::render_list(
                &settings.output,
                &events,
                |e| EventRow::from(e),
                |e| e.id.to_string(),
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}
