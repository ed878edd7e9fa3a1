// ── Site state engine ──
//
// The sole mutation gateway for the fleet. Every actor (console,
// client terminal, bulk dispatch, alarm simulator) routes status
// changes through here, which is what makes the registry write and
// journal append one atomic unit per site.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use crate::config::{DEFAULT_SIMULATOR_PERIOD, EngineConfig};
use crate::error::EngineError;
use crate::journal::EventJournal;
use crate::model::{
    AlarmAlert, FleetSummary, SecuritySite, SiteStatus, SystemEvent, TransitionSource,
};
use crate::registry::SiteRegistry;
use crate::seed::{FleetSeeder, RandomSeeder};
use crate::simulator::{self, SimulatorHandle};
use crate::stream::{FleetSnapshot, FleetStream};

const EVENT_CHANNEL_SIZE: usize = 256;
const ALERT_CHANNEL_SIZE: usize = 256;

// ── TransitionOutcome ────────────────────────────────────────────────

/// What a single accepted transition produced.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// Site record after the write.
    pub site: Arc<SecuritySite>,
    /// Journal entry, present when the status maps to an event kind.
    pub event: Option<Arc<SystemEvent>>,
    /// Whether this transition raised the alert signal.
    pub alert: bool,
}

// ── SiteEngine ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<EngineInner>`, so the console, telemetry,
/// and simulator can each hold their own handle. Owns the registry and
/// journal outright; collaborators only ever see snapshots and feeds.
#[derive(Clone)]
pub struct SiteEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    registry: SiteRegistry,
    journal: EventJournal,
    /// Every journal append, for presentation consumers.
    event_tx: broadcast::Sender<Arc<SystemEvent>>,
    /// Transitions into `emergency`/`alarm` only, for the notifier.
    alert_tx: broadcast::Sender<AlarmAlert>,
}

impl SiteEngine {
    /// Initialize a fleet with the default random seeding profile.
    ///
    /// Sites get ids `1..=config.fleet_size`; the set never changes
    /// afterwards.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_seeder(config, &mut RandomSeeder::new())
    }

    /// Initialize a fleet from a caller-supplied seeder.
    pub fn with_seeder(config: EngineConfig, seeder: &mut dyn FleetSeeder) -> Self {
        let registry = SiteRegistry::new();
        for id in 1..=config.fleet_size {
            let seed = seeder.seed(id);
            registry.insert(SecuritySite {
                id,
                address: seed.address,
                status: seed.status,
                battery: seed.battery.min(100),
                last_activity: seed.last_activity,
            });
        }
        registry.publish();

        let journal = EventJournal::new(config.journal_capacity);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        let (alert_tx, _) = broadcast::channel(ALERT_CHANNEL_SIZE);

        info!(fleet_size = config.fleet_size, "fleet initialized");
        Self {
            inner: Arc::new(EngineInner {
                config,
                registry,
                journal,
                event_tx,
                alert_tx,
            }),
        }
    }

    /// Access the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Apply one status transition to one site.
    ///
    /// Any status is accepted regardless of the current one. On
    /// success the site's `status` and `last_activity` are updated and,
    /// when the status maps to an event kind, a journal entry is
    /// appended; the two land atomically with respect to every other
    /// transition on the same site. `suspended` journals nothing.
    pub fn apply_transition(
        &self,
        site_id: u32,
        status: SiteStatus,
        source: TransitionSource,
    ) -> Result<TransitionOutcome, EngineError> {
        let mut entry = self
            .inner
            .registry
            .entry(site_id)
            .ok_or(EngineError::SiteNotFound { id: site_id })?;

        let now = Utc::now();
        let updated = Arc::new(entry.value().with_status(status, now));
        *entry.value_mut() = Arc::clone(&updated);

        // Still holding the entry guard: the append lands in journal
        // order consistent with the status write for this site.
        let event = status.event_kind().map(|kind| {
            self.inner
                .journal
                .append(site_id, kind, source, now, render_message(site_id, status, source))
        });
        drop(entry);

        self.inner.registry.publish();

        if let Some(ref event) = event {
            let _ = self.inner.event_tx.send(Arc::clone(event));
            if status.is_alerting() {
                let _ = self.inner.alert_tx.send(AlarmAlert {
                    site_id,
                    status,
                    event: Arc::clone(event),
                });
            }
        }

        debug!(site_id, %status, %source, "transition applied");
        Ok(TransitionOutcome {
            site: updated,
            event,
            alert: status.is_alerting(),
        })
    }

    /// Update a site's battery reading (telemetry boundary). The value
    /// is clamped to 100; no journal entry is produced.
    pub fn set_battery(&self, site_id: u32, percent: u8) -> Result<Arc<SecuritySite>, EngineError> {
        let mut entry = self
            .inner
            .registry
            .entry(site_id)
            .ok_or(EngineError::SiteNotFound { id: site_id })?;

        let updated = Arc::new(entry.value().with_battery(percent));
        *entry.value_mut() = Arc::clone(&updated);
        drop(entry);

        self.inner.registry.publish();
        trace!(site_id, battery = updated.battery, "battery updated");
        Ok(updated)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Look up one site by id.
    pub fn site(&self, site_id: u32) -> Result<Arc<SecuritySite>, EngineError> {
        self.inner
            .registry
            .get(site_id)
            .ok_or(EngineError::SiteNotFound { id: site_id })
    }

    /// Current fleet snapshot in ascending id order (cheap `Arc` clone).
    pub fn snapshot(&self) -> FleetSnapshot {
        self.inner.registry.snapshot()
    }

    /// Number of sites in the fleet.
    pub fn site_count(&self) -> usize {
        self.inner.registry.len()
    }

    /// Journal enumeration, newest first, optionally limited.
    pub fn events(&self, limit: Option<usize>) -> Vec<Arc<SystemEvent>> {
        self.inner.journal.snapshot(limit)
    }

    /// Number of retained journal entries.
    pub fn event_count(&self) -> usize {
        self.inner.journal.len()
    }

    /// Census of the fleet by status.
    pub fn summary(&self) -> FleetSummary {
        let snapshot = self.inner.registry.snapshot();
        let mut summary = FleetSummary {
            guarded: 0,
            not_guarded: 0,
            alerting: 0,
            suspended: 0,
            total: 0,
        };
        for site in snapshot.iter() {
            summary.total += 1;
            match site.status {
                SiteStatus::Guarded => summary.guarded += 1,
                SiteStatus::NotGuarded => summary.not_guarded += 1,
                SiteStatus::Emergency | SiteStatus::Alarm => summary.alerting += 1,
                SiteStatus::Suspended => summary.suspended += 1,
            }
        }
        summary
    }

    /// Sites currently in `emergency` or `alarm`, emergencies first,
    /// ascending id within each group.
    pub fn active_alerts(&self) -> Vec<Arc<SecuritySite>> {
        let snapshot = self.inner.registry.snapshot();
        let mut alerts: Vec<Arc<SecuritySite>> = snapshot
            .iter()
            .filter(|site| site.status.is_alerting())
            .cloned()
            .collect();
        // Stable sort keeps the snapshot's id order within each group.
        alerts.sort_by_key(|site| site.status != SiteStatus::Emergency);
        alerts
    }

    // ── Feeds ────────────────────────────────────────────────────────

    /// Subscribe to fleet snapshot changes.
    pub fn subscribe(&self) -> FleetStream {
        FleetStream::new(self.inner.registry.subscribe())
    }

    /// Subscribe to every journal append.
    pub fn subscribe_events(&self) -> broadcast::Receiver<Arc<SystemEvent>> {
        self.inner.event_tx.subscribe()
    }

    /// Subscribe to the alert signal (`emergency`/`alarm` transitions).
    pub fn subscribe_alerts(&self) -> broadcast::Receiver<AlarmAlert> {
        self.inner.alert_tx.subscribe()
    }

    // ── Simulator ────────────────────────────────────────────────────

    /// Start an alarm simulator on the current runtime.
    ///
    /// A zero period falls back to the built-in default. The returned
    /// handle must be stopped to end injection; see
    /// [`SimulatorHandle::stop`].
    pub fn start_simulator(&self, period: Duration) -> SimulatorHandle {
        let period = if period.is_zero() {
            DEFAULT_SIMULATOR_PERIOD
        } else {
            period
        };
        simulator::spawn(self.clone(), period)
    }
}

/// Journal message for a transition, embedding the site id, the status
/// label, and a marker for client-initiated changes.
fn render_message(site_id: u32, status: SiteStatus, source: TransitionSource) -> String {
    match source {
        TransitionSource::Admin => format!("Site #{site_id}: {}", status.label()),
        TransitionSource::Client => format!("Site #{site_id}: {} (client)", status.label()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed::FixedSeeder;

    fn small_fleet(size: u32) -> SiteEngine {
        let config = EngineConfig {
            fleet_size: size,
            ..EngineConfig::default()
        };
        let mut seeder = FixedSeeder {
            status: SiteStatus::NotGuarded,
            battery: 50,
            last_activity: Utc::now(),
        };
        SiteEngine::with_seeder(config, &mut seeder)
    }

    #[test]
    fn messages_embed_site_id_label_and_client_marker() {
        assert_eq!(
            render_message(17, SiteStatus::Alarm, TransitionSource::Client),
            "Site #17: alarm triggered (client)"
        );
        assert_eq!(
            render_message(3, SiteStatus::Guarded, TransitionSource::Admin),
            "Site #3: armed"
        );
    }

    #[test]
    fn fleet_is_seeded_with_contiguous_ids() {
        let engine = small_fleet(25);
        assert_eq!(engine.site_count(), 25);
        assert_eq!(engine.site(1).unwrap().address, "1 Warden Street");
        assert_eq!(engine.site(25).unwrap().battery, 50);
        assert!(engine.site(26).is_err());
    }

    #[test]
    fn summary_censuses_every_status() {
        let engine = small_fleet(6);
        engine
            .apply_transition(1, SiteStatus::Guarded, TransitionSource::Admin)
            .unwrap();
        engine
            .apply_transition(2, SiteStatus::Emergency, TransitionSource::Admin)
            .unwrap();
        engine
            .apply_transition(3, SiteStatus::Alarm, TransitionSource::Admin)
            .unwrap();
        engine
            .apply_transition(4, SiteStatus::Suspended, TransitionSource::Admin)
            .unwrap();

        let summary = engine.summary();
        assert_eq!(summary.guarded, 1);
        assert_eq!(summary.not_guarded, 2);
        assert_eq!(summary.alerting, 2);
        assert_eq!(summary.suspended, 1);
        assert_eq!(summary.total, 6);
    }

    #[test]
    fn active_alerts_put_emergencies_before_alarms() {
        let engine = small_fleet(10);
        engine
            .apply_transition(2, SiteStatus::Alarm, TransitionSource::Admin)
            .unwrap();
        engine
            .apply_transition(7, SiteStatus::Emergency, TransitionSource::Admin)
            .unwrap();
        engine
            .apply_transition(4, SiteStatus::Emergency, TransitionSource::Client)
            .unwrap();

        let alerts = engine.active_alerts();
        let ids: Vec<u32> = alerts.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 7, 2]);
    }

    #[test]
    fn battery_is_clamped_and_silent() {
        let engine = small_fleet(3);
        let site = engine.set_battery(2, 130).unwrap();
        assert_eq!(site.battery, 100);
        assert_eq!(engine.event_count(), 0);
    }
}
