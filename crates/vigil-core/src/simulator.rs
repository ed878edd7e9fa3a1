// ── Alarm simulator ──
//
// Periodic background task that picks one site uniformly at random and
// forces an alarm through the transition engine, exactly like any
// other actor. Runs until its handle is stopped.

use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::engine::SiteEngine;
use crate::model::{SiteStatus, TransitionSource};

/// A running simulator instance.
///
/// Stopping is synchronous from the caller's point of view:
/// [`stop()`](Self::stop) resolves only after the task has exited, so
/// no alarm can be injected once it returns. Dropping the handle
/// without stopping leaves the task running for the engine's lifetime.
pub struct SimulatorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Cancel the periodic task and wait for it to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Spawn the simulator onto the current runtime.
pub(crate) fn spawn(engine: SiteEngine, period: Duration) -> SimulatorHandle {
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run(engine, period, cancel.clone()));
    SimulatorHandle { cancel, task }
}

async fn run(engine: SiteEngine, period: Duration, cancel: CancellationToken) {
    debug!(period_secs = period.as_secs(), "alarm simulator started");
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => inject_alarm(&engine),
        }
    }
    debug!("alarm simulator stopped");
}

/// Force one random site into `alarm`, as the admin actor.
fn inject_alarm(engine: &SiteEngine) {
    let fleet_size = engine.config().fleet_size;
    if fleet_size == 0 {
        return;
    }

    let site_id = rand::rng().random_range(1..=fleet_size);
    match engine.apply_transition(site_id, SiteStatus::Alarm, TransitionSource::Admin) {
        Ok(_) => debug!(site_id, "alarm injected"),
        Err(err) => warn!(site_id, error = %err, "alarm injection failed"),
    }
}
