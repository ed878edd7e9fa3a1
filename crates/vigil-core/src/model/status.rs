// ── Site status ──
//
// Status is actor-declared fact: any status may be assigned regardless
// of the current one. There is deliberately no transition matrix here
// or anywhere else in the engine.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::event::EventKind;

/// The guarding state of a single site.
///
/// Wire form (serde and `FromStr`/`Display`) is snake_case:
/// `"guarded"`, `"not_guarded"`, `"emergency"`, `"alarm"`, `"suspended"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SiteStatus {
    /// Under guard (armed).
    Guarded,
    /// Not under guard.
    NotGuarded,
    /// A response crew has been dispatched.
    Emergency,
    /// The on-site alarm has fired.
    Alarm,
    /// Monitoring is suspended for this site.
    Suspended,
}

impl SiteStatus {
    /// Parse a wire-form status string.
    ///
    /// The typed API cannot carry an out-of-range status; this is the
    /// boundary where dynamic input (CLI args, config) turns into either
    /// a status or [`EngineError::InvalidStatus`].
    pub fn parse(value: &str) -> Result<Self, EngineError> {
        value.parse().map_err(|_| EngineError::InvalidStatus {
            value: value.to_owned(),
        })
    }

    /// Human-readable label embedded in journal messages and console output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Guarded => "armed",
            Self::NotGuarded => "disarmed",
            Self::Emergency => "response dispatched",
            Self::Alarm => "alarm triggered",
            Self::Suspended => "suspended",
        }
    }

    /// The journal event kind a transition into this status produces.
    ///
    /// `Suspended` maps to nothing: the status changes silently with
    /// respect to the journal.
    pub fn event_kind(self) -> Option<EventKind> {
        match self {
            Self::Guarded => Some(EventKind::GuardOn),
            Self::NotGuarded => Some(EventKind::GuardOff),
            Self::Emergency => Some(EventKind::EmergencyCall),
            Self::Alarm => Some(EventKind::Alarm),
            Self::Suspended => None,
        }
    }

    /// Whether entering this status raises the external alert signal.
    pub fn is_alerting(self) -> bool {
        matches!(self, Self::Emergency | Self::Alarm)
    }
}
