// ── Site registry ──
//
// Sharded concurrent storage for the fleet with push-based change
// notification via `watch` channels. Mutation happens only through the
// engine, which holds a shard guard for the whole read-modify-write.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use tokio::sync::watch;

use crate::model::SecuritySite;

/// Canonical id → site mapping.
///
/// Uses `DashMap` so transitions on different shards proceed in
/// parallel, and `watch` channels for push-based snapshot delivery.
/// Every publish bumps a version counter and rebuilds the snapshot
/// subscribers receive.
pub(crate) struct SiteRegistry {
    /// Primary storage: site id -> current record.
    sites: DashMap<u32, Arc<SecuritySite>>,

    /// Version counter, bumped on every publish.
    version: watch::Sender<u64>,

    /// Full fleet snapshot in ascending id order, rebuilt on publish.
    snapshot: watch::Sender<Arc<Vec<Arc<SecuritySite>>>>,
}

impl SiteRegistry {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            sites: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert a freshly seeded site. Fleet initialization only; nothing
    /// else ever adds or removes entries.
    pub(crate) fn insert(&self, site: SecuritySite) {
        self.sites.insert(site.id, Arc::new(site));
    }

    /// Look up a site by id.
    pub(crate) fn get(&self, id: u32) -> Option<Arc<SecuritySite>> {
        self.sites.get(&id).map(|r| Arc::clone(r.value()))
    }

    /// Exclusive access to one site's slot.
    ///
    /// The returned guard holds the shard write lock, so the caller's
    /// read-modify-write (and journal append) is atomic with respect to
    /// every other transition touching the same site.
    pub(crate) fn entry(&self, id: u32) -> Option<RefMut<'_, u32, Arc<SecuritySite>>> {
        self.sites.get_mut(&id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<SecuritySite>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<SecuritySite>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.sites.len()
    }

    /// Rebuild the ordered snapshot and notify subscribers.
    ///
    /// Call after mutations, never while holding an entry guard. Each
    /// rebuild reads the live map, so concurrent publishers always
    /// converge on the latest state.
    pub(crate) fn publish(&self) {
        let mut values: Vec<Arc<SecuritySite>> =
            self.sites.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by_key(|site| site.id);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::SiteStatus;

    fn site(id: u32) -> SecuritySite {
        SecuritySite {
            id,
            address: format!("{id} Warden Street"),
            status: SiteStatus::Guarded,
            battery: 80,
            last_activity: Utc::now(),
        }
    }

    #[test]
    fn get_returns_inserted_site() {
        let registry = SiteRegistry::new();
        registry.insert(site(5));
        registry.publish();

        assert_eq!(registry.get(5).unwrap().id, 5);
        assert!(registry.get(6).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn snapshot_is_ordered_by_id() {
        let registry = SiteRegistry::new();
        for id in [3, 1, 2] {
            registry.insert(site(id));
        }
        registry.publish();

        let snap = registry.snapshot();
        let ids: Vec<u32> = snap.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn publish_notifies_subscribers() {
        let registry = SiteRegistry::new();
        let mut rx = registry.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        registry.insert(site(1));
        registry.publish();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[test]
    fn entry_guard_writes_are_visible() {
        let registry = SiteRegistry::new();
        registry.insert(site(7));
        registry.publish();

        {
            let mut entry = registry.entry(7).unwrap();
            let updated = entry.value().with_status(SiteStatus::Alarm, Utc::now());
            *entry.value_mut() = Arc::new(updated);
        }
        registry.publish();

        assert_eq!(registry.get(7).unwrap().status, SiteStatus::Alarm);
    }
}
