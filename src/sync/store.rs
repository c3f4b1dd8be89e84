//! Process-wide synchronization store.
//!
//! Holds the latest `Snapshot` plus loading/error status and publishes every
//! change through a `tokio::sync::watch` channel. The store is the single
//! writer of this state; the dashboard and the note notifier only ever read.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::feed::{Snapshot, SnapshotSource};

/// The state tuple every consumer observes.
#[derive(Debug, Clone, Serialize)]
pub struct SyncState {
    /// Latest successfully fetched snapshot. Survives fetch failures.
    pub snapshot: Option<Snapshot>,
    /// True only until the very first fetch completes (success or failure).
    /// Re-polling never re-enters the loading state once data exists.
    pub loading: bool,
    /// Human-readable description of the most recent fetch failure, cleared
    /// at the start of every fetch.
    pub error: Option<String>,
    /// When the current snapshot was fetched.
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for SyncState {
    fn default() -> Self {
        SyncState {
            snapshot: None,
            loading: true,
            error: None,
            last_updated: None,
        }
    }
}

/// Single source of truth for tournament data.
///
/// Constructed once in the composition root and shared by `Arc`; tests build
/// isolated instances with stub sources.
pub struct SyncStore {
    source: Arc<dyn SnapshotSource>,
    state: watch::Sender<SyncState>,
}

impl SyncStore {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        SyncStore { source, state }
    }

    /// Subscribe to state updates. The receiver always holds the latest
    /// state, so a late subscriber is immediately consistent.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Clone of the current state, for one-off reads outside a subscription.
    #[allow(dead_code)]
    pub fn current(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Fetch one snapshot and merge the result into shared state.
    ///
    /// Never fails from the caller's perspective: transport errors, bad
    /// status codes and malformed bodies all end up in `SyncState::error`
    /// with the previous snapshot left intact.
    ///
    /// Overlapping calls run independently and the last one to *complete*
    /// wins, matching the polling design this store serves (a 30s period
    /// dwarfs request latency, so reordering is accepted rather than
    /// sequenced away).
    pub async fn fetch_data(&self) {
        self.state.send_modify(|s| {
            // Only the very first load shows a loading state; after that a
            // poll refreshes quietly behind the existing data.
            if s.snapshot.is_none() {
                s.loading = true;
            }
            s.error = None;
        });

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                debug!(
                    "Snapshot refreshed ({} match notes)",
                    snapshot.match_notes.len()
                );
                self.state.send_modify(|s| {
                    s.snapshot = Some(snapshot);
                    s.loading = false;
                    s.error = None;
                    s.last_updated = Some(Utc::now());
                });
            }
            Err(e) => {
                warn!("Snapshot fetch failed: {e:#}");
                self.state.send_modify(|s| {
                    s.error = Some(format!("{e:#}"));
                    s.loading = false;
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::{note, snapshot_with_notes, StubSource};
    use anyhow::anyhow;
    use std::time::Duration;

    fn store_with(source: StubSource) -> (Arc<StubSource>, SyncStore) {
        let source = Arc::new(source);
        let store = SyncStore::new(source.clone());
        (source, store)
    }

    #[tokio::test]
    async fn first_successful_fetch_populates_state() {
        let snap = snapshot_with_notes(vec![note("1", "1", "1", "A", "Four runs")]);
        let (_, store) = store_with(StubSource::new(vec![Ok(snap)]));

        assert!(store.current().loading);
        store.fetch_data().await;

        let state = store.current();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.last_updated.is_some());
        assert_eq!(state.snapshot.unwrap().match_notes.len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_preserves_previous_snapshot() {
        let snap = snapshot_with_notes(vec![note("1", "1", "1", "A", "Four runs")]);
        let (_, store) = store_with(StubSource::new(vec![
            Ok(snap),
            Err(anyhow!("connection refused")),
        ]));

        store.fetch_data().await;
        let before = store.current().snapshot.unwrap();

        store.fetch_data().await;
        let state = store.current();
        assert_eq!(
            state.snapshot.as_ref().unwrap().match_notes,
            before.match_notes
        );
        assert!(state.error.unwrap().contains("connection refused"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn loading_clears_even_when_first_fetch_fails() {
        let (_, store) = store_with(StubSource::new(vec![Err(anyhow!("boom"))]));

        store.fetch_data().await;

        let state = store.current();
        assert!(!state.loading);
        assert!(state.snapshot.is_none());
        assert!(state.error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn repoll_does_not_reenter_loading_and_clears_error() {
        let snap = snapshot_with_notes(vec![note("1", "1", "1", "A", "Four runs")]);
        let source = StubSource::new(vec![
            Ok(snap.clone()),
            Err(anyhow!("blip")),
            Ok(snap),
        ])
        .with_latency(Duration::from_millis(50));
        let (source, store) = store_with(source);
        let store = Arc::new(store);

        store.fetch_data().await; // populate
        store.fetch_data().await; // fail, sets error
        assert!(store.current().error.is_some());

        // Third fetch: mid-flight the error must already be cleared and the
        // existing snapshot must still be showing without a loading flash.
        let bg = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch_data().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let mid = store.current();
        assert!(!mid.loading);
        assert!(mid.error.is_none());
        assert!(mid.snapshot.is_some());

        bg.await.unwrap();
        assert_eq!(source.calls(), 3);
    }

    /// Source where each scripted response carries its own latency, so two
    /// overlapping fetches can complete out of issue order.
    struct TimedSource {
        script: std::sync::Mutex<std::collections::VecDeque<(Duration, crate::feed::Snapshot)>>,
    }

    #[async_trait::async_trait]
    impl crate::feed::SnapshotSource for TimedSource {
        async fn fetch_snapshot(&self) -> anyhow::Result<crate::feed::Snapshot> {
            let (delay, snap) = self
                .script
                .lock()
                .expect("script lock poisoned")
                .pop_front()
                .expect("script exhausted");
            tokio::time::sleep(delay).await;
            Ok(snap)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_fetches_last_completion_wins() {
        // The first fetch is slow and the second fast, so the second's
        // response lands first and the first's overwrites it. Last completed
        // write winning is the documented behavior of this store.
        let slow = snapshot_with_notes(vec![note("1", "1", "1", "A", "slow")]);
        let fast = snapshot_with_notes(vec![note("1", "1", "2", "A", "fast")]);
        let source = Arc::new(TimedSource {
            script: std::sync::Mutex::new(
                vec![
                    (Duration::from_millis(100), slow),
                    (Duration::from_millis(10), fast),
                ]
                .into(),
            ),
        });
        let store = Arc::new(SyncStore::new(source));

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch_data().await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch_data().await })
        };
        let (a, b) = tokio::join!(first, second);
        a.unwrap();
        b.unwrap();

        let notes = store.current().snapshot.unwrap().match_notes;
        assert_eq!(notes[0].description, "slow");
    }

    #[tokio::test]
    async fn subscribers_observe_updates() {
        let snap = snapshot_with_notes(vec![note("1", "1", "1", "A", "Four runs")]);
        let (_, store) = store_with(StubSource::new(vec![Ok(snap)]));
        let mut rx = store.subscribe();

        store.fetch_data().await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert!(state.snapshot.is_some());
    }
}
