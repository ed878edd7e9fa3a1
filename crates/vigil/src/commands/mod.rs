//! Command dispatch: bridges CLI args -> engine calls -> output formatting.

pub mod config_cmd;
pub mod events;
pub mod simulate;
pub mod sites;
pub mod status;
pub mod watch;

use vigil_core::SiteEngine;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch an engine-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    engine: &SiteEngine,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        Command::Sites(args) => sites::handle(engine, args, settings),
        Command::Events(args) => events::handle(engine, args, settings),
        Command::Status => status::handle(engine, settings),
        Command::Simulate(args) => simulate::handle(engine, args, settings).await,
        Command::Watch => watch::handle(engine, settings).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
