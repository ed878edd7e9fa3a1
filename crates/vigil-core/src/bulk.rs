// ── Bulk dispatcher ──
//
// Best-effort fan-out of one transition across many sites. Per-id
// failures never abort the rest, and there is no rollback.

use std::collections::BTreeSet;

use tracing::debug;

use crate::engine::{SiteEngine, TransitionOutcome};
use crate::error::EngineError;
use crate::model::{SiteStatus, TransitionSource};

/// Outcome for one id within a bulk dispatch.
#[derive(Debug)]
pub struct BulkEntry {
    pub site_id: u32,
    pub outcome: Result<TransitionOutcome, EngineError>,
}

/// Aggregate outcome of a bulk dispatch.
///
/// Entries are in ascending id order with duplicates collapsed, one per
/// distinct requested id.
#[derive(Debug)]
pub struct BulkReport {
    pub entries: Vec<BulkEntry>,
}

impl BulkReport {
    /// Count of successful transitions.
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_ok()).count()
    }

    /// Count of ids that failed.
    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }
}

impl SiteEngine {
    /// Apply one transition to every id in `site_ids`.
    ///
    /// Ids are visited in ascending order. A failure for one id (for
    /// example `SiteNotFound`) is recorded in its entry and processing
    /// continues with the rest.
    pub fn apply_bulk(
        &self,
        site_ids: &[u32],
        status: SiteStatus,
        source: TransitionSource,
    ) -> BulkReport {
        let ids: BTreeSet<u32> = site_ids.iter().copied().collect();
        let entries = ids
            .into_iter()
            .map(|site_id| BulkEntry {
                site_id,
                outcome: self.apply_transition(site_id, status, source),
            })
            .collect();

        let report = BulkReport { entries };
        debug!(
            requested = site_ids.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            %status,
            "bulk dispatch complete"
        );
        report
    }
}
