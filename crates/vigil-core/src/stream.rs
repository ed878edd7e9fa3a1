// ── Fleet snapshot stream ──
//
// Read-only subscription to the registry's published snapshot. Nothing
// reachable from here can mutate engine state.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::SecuritySite;

/// The whole fleet in ascending id order, as published by the registry.
pub type FleetSnapshot = Arc<Vec<Arc<SecuritySite>>>;

/// A subscription to the ordered fleet snapshot.
///
/// Holds the snapshot observed most recently and wakes on every registry
/// publish after it, either through [`changed()`](Self::changed) or by
/// converting into a `Stream`.
pub struct FleetStream {
    current: FleetSnapshot,
    receiver: watch::Receiver<FleetSnapshot>,
}

impl FleetStream {
    pub(crate) fn new(receiver: watch::Receiver<FleetSnapshot>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The last observed snapshot (initially the one captured at
    /// subscription time).
    pub fn current(&self) -> &FleetSnapshot {
        &self.current
    }

    /// Wait for the next publish, returning the new snapshot.
    /// Returns `None` once the engine has been dropped.
    pub async fn changed(&mut self) -> Option<FleetSnapshot> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the snapshot held at conversion time first,
    /// then one snapshot per publish.
    pub fn into_stream(self) -> FleetWatchStream {
        FleetWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter over the registry's `watch` channel.
pub struct FleetWatchStream {
    inner: WatchStream<FleetSnapshot>,
}

impl Stream for FleetWatchStream {
    type Item = FleetSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
