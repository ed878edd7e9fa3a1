// ── Engine configuration ──

use std::time::Duration;

/// Fleet size used when none is configured.
pub const DEFAULT_FLEET_SIZE: u32 = 400;

/// Journal ring capacity used when none is configured.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 100;

/// Alarm simulator period used when none is configured.
pub const DEFAULT_SIMULATOR_PERIOD: Duration = Duration::from_secs(300);

/// Tuning knobs for a [`SiteEngine`](crate::SiteEngine).
///
/// All values are fixed at engine construction; nothing here is mutable
/// at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of sites created at initialization. Ids are `1..=fleet_size`
    /// and no site is ever added or removed afterwards.
    pub fleet_size: u32,

    /// Maximum journal entries retained before the oldest is evicted.
    pub journal_capacity: usize,

    /// Default period for the alarm simulator. Callers of
    /// [`start_simulator`](crate::SiteEngine::start_simulator) may override
    /// it per run.
    pub simulator_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fleet_size: DEFAULT_FLEET_SIZE,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
            simulator_period: DEFAULT_SIMULATOR_PERIOD,
        }
    }
}
