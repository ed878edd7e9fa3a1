//! Site state engine for the vigil security-monitoring workspace.
//!
//! This crate owns the fleet state, the transition semantics, and the
//! reactive data infrastructure everything else builds on:
//!
//! - **[`SiteEngine`]** — Central facade and sole mutation gateway.
//!   Construction seeds the fleet; [`apply_transition()`](SiteEngine::apply_transition)
//!   serializes status writes and journal appends per site, and
//!   [`start_simulator()`](SiteEngine::start_simulator) runs the periodic
//!   alarm injector until its handle is stopped.
//!
//! - **Registry + journal** — Sharded concurrent fleet storage
//!   (`DashMap` + `tokio::sync::watch` snapshots) and a bounded,
//!   newest-first ring of [`SystemEvent`]s. Both live behind the engine
//!   and are never mutated directly by consumers.
//!
//! - **[`FleetStream`]** — Subscription handle for the ordered fleet
//!   snapshot. Exposes `current()` / `changed()` for reactive
//!   rendering; broadcast receivers cover the journal tail and the
//!   alert signal.
//!
//! - **[`FleetSeeder`]** — Injectable initial-state generation. The
//!   random profile matches production; [`FixedSeeder`] makes tests and
//!   demos reproducible.
//!
//! - **Domain model** ([`model`]) — Plain records ([`SecuritySite`],
//!   [`SystemEvent`]) and the status enumeration with its event-kind
//!   mapping. Statuses carry no transition matrix: any state is
//!   reachable from any state.

pub mod bulk;
pub mod config;
pub mod engine;
pub mod error;
mod journal;
pub mod model;
mod registry;
pub mod seed;
pub mod simulator;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bulk::{BulkEntry, BulkReport};
pub use config::{
    DEFAULT_FLEET_SIZE, DEFAULT_JOURNAL_CAPACITY, DEFAULT_SIMULATOR_PERIOD, EngineConfig,
};
pub use engine::{SiteEngine, TransitionOutcome};
pub use error::EngineError;
pub use seed::{FixedSeeder, FleetSeeder, RandomSeeder, SiteSeed};
pub use simulator::SimulatorHandle;
pub use stream::{FleetSnapshot, FleetStream, FleetWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AlarmAlert, EventKind, FleetSummary, SecuritySite, SiteStatus, SystemEvent, TransitionSource,
};
