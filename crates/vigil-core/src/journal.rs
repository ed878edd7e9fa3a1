// ── Event journal ──
//
// Bounded, append-only history of accepted transitions, newest first
// when read. Eviction is silent: the contract has no clear() and no
// overflow error.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::model::{EventKind, SystemEvent, TransitionSource};

/// Ring buffer of [`SystemEvent`]s with a fixed capacity.
///
/// A single mutex makes appends atomic across every concurrent appender
/// (console, client, bulk, simulator); evictions and insertions never
/// race. Ids are assigned under the same lock so they always agree with
/// insertion order.
pub(crate) struct EventJournal {
    inner: Mutex<JournalInner>,
    capacity: usize,
}

struct JournalInner {
    /// Oldest at the front, newest at the back.
    entries: VecDeque<Arc<SystemEvent>>,
    /// Next creation-ordered event id.
    next_id: u64,
}

impl EventJournal {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(JournalInner {
                entries: VecDeque::with_capacity(capacity),
                next_id: 0,
            }),
            capacity,
        }
    }

    /// Build and append a new event, evicting the oldest entry when at
    /// capacity. Returns the stored event.
    pub(crate) fn append(
        &self,
        site_id: u32,
        kind: EventKind,
        source: TransitionSource,
        timestamp: DateTime<Utc>,
        message: String,
    ) -> Arc<SystemEvent> {
        let mut inner = self.lock();
        let event = Arc::new(SystemEvent {
            id: inner.next_id,
            site_id,
            kind,
            timestamp,
            source,
            message,
        });
        inner.next_id += 1;

        if self.capacity > 0 {
            while inner.entries.len() >= self.capacity {
                inner.entries.pop_front();
            }
            inner.entries.push_back(Arc::clone(&event));
        }

        event
    }

    /// Newest-first enumeration, optionally limited.
    pub(crate) fn snapshot(&self, limit: Option<usize>) -> Vec<Arc<SystemEvent>> {
        let inner = self.lock();
        let take = limit.unwrap_or(usize::MAX);
        inner.entries.iter().rev().take(take).cloned().collect()
    }

    /// Number of retained entries (bounded by capacity).
    pub(crate) fn len(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, JournalInner> {
        // No append path panics while holding the lock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn journal_with(capacity: usize, appends: usize) -> EventJournal {
        let journal = EventJournal::new(capacity);
        for i in 0..appends {
            #[allow(clippy::cast_possible_truncation)]
            let site_id = (i + 1) as u32;
            journal.append(
                site_id,
                EventKind::Alarm,
                TransitionSource::Admin,
                Utc::now(),
                format!("Site #{site_id}: alarm triggered"),
            );
        }
        journal
    }

    #[test]
    fn enumeration_is_newest_first() {
        let journal = journal_with(10, 3);
        let events = journal.snapshot(None);

        let ids: Vec<u64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 0]);
    }

    #[test]
    fn capacity_evicts_the_oldest_silently() {
        let journal = journal_with(100, 101);

        assert_eq!(journal.len(), 100);
        let events = journal.snapshot(None);
        // Event 0 fell off; 100 is the newest, 1 the oldest survivor.
        assert_eq!(events.first().unwrap().id, 100);
        assert_eq!(events.last().unwrap().id, 1);
    }

    #[test]
    fn limit_truncates_from_the_newest_end() {
        let journal = journal_with(10, 5);
        let events = journal.snapshot(Some(2));

        let ids: Vec<u64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn ids_keep_advancing_across_eviction() {
        let journal = journal_with(2, 5);
        let events = journal.snapshot(None);

        let ids: Vec<u64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(journal.len(), 2);
    }
}
