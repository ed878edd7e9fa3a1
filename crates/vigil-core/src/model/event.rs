// ── Journal event domain types ──

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::SiteStatus;

/// Actor class that initiated a transition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransitionSource {
    /// Operations console, or an autonomous actor acting on its behalf
    /// (the alarm simulator injects as `admin`).
    Admin,
    /// The site's own client terminal.
    Client,
}

/// Classification of a journal event, derived from the target status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    /// A response crew was dispatched (`emergency`).
    EmergencyCall,
    /// A site was armed (`guarded`).
    GuardOn,
    /// A site was disarmed (`not_guarded`).
    GuardOff,
    /// An on-site alarm fired (`alarm`).
    Alarm,
}

impl EventKind {
    /// Whether this kind was recorded by an alert-raising transition.
    pub fn is_alerting(self) -> bool {
        matches!(self, Self::EmergencyCall | Self::Alarm)
    }
}

/// One immutable journal entry.
///
/// Every field is engine-assigned; callers never supply any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvent {
    /// Creation-ordered sequence number, unique for the process lifetime.
    pub id: u64,
    /// The site the transition applied to. Outlives the site itself.
    pub site_id: u32,
    /// What happened, per the status mapping.
    pub kind: EventKind,
    /// Capture time of the transition.
    pub timestamp: DateTime<Utc>,
    /// Who initiated it.
    pub source: TransitionSource,
    /// Rendered description, e.g. `"Site #17: alarm triggered (client)"`.
    pub message: String,
}

/// Alert-feed payload for transitions into `emergency` or `alarm`.
///
/// Consumed by an external notifier; the engine itself never renders,
/// plays, or delivers anything.
#[derive(Debug, Clone)]
pub struct AlarmAlert {
    /// The site that went alerting.
    pub site_id: u32,
    /// The status that triggered the alert.
    pub status: SiteStatus,
    /// The journal entry recorded for the transition.
    pub event: Arc<SystemEvent>,
}
