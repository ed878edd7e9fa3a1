// ── Domain model ──
//
// Canonical types for the site state engine. Everything consumers see
// flows through these records; all of them are plain data with no
// behavior beyond small copy helpers.

pub mod event;
pub mod site;
pub mod status;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use vigil_core::model::*` gives you everything.

pub use event::{AlarmAlert, EventKind, SystemEvent, TransitionSource};
pub use site::{FleetSummary, SecuritySite};
pub use status::SiteStatus;
