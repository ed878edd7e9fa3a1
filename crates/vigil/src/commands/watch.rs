//! Live feed command handler.
//!
//! Streams every journal append plus the alert signal, with the
//! simulator running in the background at the configured period so the
//! fleet actually moves.

use tokio::sync::broadcast::error::RecvError;
use vigil_core::SiteEngine;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub async fn handle(engine: &SiteEngine, settings: &Settings) -> Result<(), CliError> {
    let mut events = engine.subscribe_events();
    let mut alerts = engine.subscribe_alerts();
    let handle = engine.start_simulator(settings.engine.simulator_period);
    if !settings.quiet {
        eprintln!(
            "Watching the fleet (simulator period {}s). Ctrl-C to stop.",
            settings.engine.simulator_period.as_secs()
        );
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            interrupted = &mut ctrl_c => {
                interrupted?;
                break;
            }
            event = events.recv() => match event {
                Ok(event) => println!("{}", output::event_line(&event, settings.use_color)),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            alert = alerts.recv() => match alert {
                Ok(alert) => println!("{}", output::alert_line(&alert, settings.use_color)),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }

    handle.stop().await;
    Ok(())
}
