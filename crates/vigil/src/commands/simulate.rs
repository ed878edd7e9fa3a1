//! Alarm simulator command handler.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use vigil_core::SiteEngine;

use crate::cli::SimulateArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Run the simulator against the fleet, streaming journal appends to
/// stdout until `--count` is reached or the process is interrupted.
pub async fn handle(
    engine: &SiteEngine,
    args: SimulateArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let period = args
        .period
        .map_or(settings.engine.simulator_period, Duration::from_secs);

    let mut events = engine.subscribe_events();
    let handle = engine.start_simulator(period);
    if !settings.quiet {
        eprintln!(
            "Simulator started, one alarm every {}s. Ctrl-C to stop.",
            period.as_secs()
        );
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut seen: u64 = 0;
    loop {
        tokio::select! {
            interrupted = &mut ctrl_c => {
                interrupted?;
                break;
            }
            event = events.recv() => match event {
                Ok(event) => {
                    println!("{}", output::event_line(&event, settings.use_color));
                    seen += 1;
                    if args.count.is_some_and(|n| seen >= n) {
                        break;
                    }
                }
                // Fell behind the channel; keep reading.
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    }

    handle.stop().await;
    if !settings.quiet {
        eprintln!("Simulator stopped after {seen} events.");
    }
    Ok(())
}
