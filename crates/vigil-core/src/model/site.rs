// ── Security site domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::SiteStatus;

/// A monitored physical location.
///
/// Sites are created once at fleet initialization and never removed.
/// `status` and `last_activity` change only through the transition
/// engine; `battery` only through the telemetry boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySite {
    /// Stable identifier, `1..=N` for a fleet of size N. Never reused.
    pub id: u32,
    /// Display address. Provisioning owns changes to it, not this engine.
    pub address: String,
    /// Current guarding state.
    pub status: SiteStatus,
    /// Battery charge percent, `0..=100`. Informational only.
    pub battery: u8,
    /// Time of the most recent accepted transition.
    pub last_activity: DateTime<Utc>,
}

impl SecuritySite {
    /// Copy with a new status and activity timestamp.
    pub(crate) fn with_status(&self, status: SiteStatus, at: DateTime<Utc>) -> Self {
        Self {
            status,
            last_activity: at,
            ..self.clone()
        }
    }

    /// Copy with a new battery reading, clamped to 100.
    pub(crate) fn with_battery(&self, battery: u8) -> Self {
        Self {
            battery: battery.min(100),
            ..self.clone()
        }
    }
}

/// Point-in-time census of the fleet, derived from a registry snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Sites currently `guarded`.
    pub guarded: u32,
    /// Sites currently `not_guarded`.
    pub not_guarded: u32,
    /// Sites in `emergency` or `alarm`.
    pub alerting: u32,
    /// Sites currently `suspended`.
    pub suspended: u32,
    /// Whole fleet, regardless of status.
    pub total: u32,
}
