//! Fixed-interval polling of the synchronization store.
//!
//! Owns the one repeating timer in the process. `start` is idempotent and
//! `stop` is safe to call repeatedly, so UI-driven composition code can call
//! either without coordinating.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::store::SyncStore;

pub struct PollScheduler {
    store: Arc<SyncStore>,
    period: Duration,
    tick_loop: Mutex<Option<JoinHandle<()>>>,
}

impl PollScheduler {
    pub fn new(store: Arc<SyncStore>, period: Duration) -> Self {
        PollScheduler {
            store,
            period,
            tick_loop: Mutex::new(None),
        }
    }

    /// Begin polling: one fetch immediately, then one per period. A second
    /// call while running is a no-op, so at most one timer ever exists.
    ///
    /// No backoff or retry: a failed fetch is simply retried on the next
    /// fixed tick.
    pub fn start(&self) {
        let mut tick_loop = self.tick_loop.lock().expect("scheduler lock poisoned");
        if tick_loop.as_ref().is_some_and(|t| !t.is_finished()) {
            debug!("Poll scheduler already running, start() ignored");
            return;
        }

        let store = Arc::clone(&self.store);
        let period = self.period;
        *tick_loop = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                // Each fetch runs on its own task so stopping the scheduler
                // never cancels a request already in flight.
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.fetch_data().await });
            }
        }));
        info!("Poll scheduler started (period {:?})", period);
    }

    /// Cancel future ticks. An in-flight fetch still completes and writes to
    /// the store. After `stop()`, `start()` resumes polling.
    pub fn stop(&self) {
        if let Some(tick_loop) = self.tick_loop.lock().expect("scheduler lock poisoned").take() {
            tick_loop.abort();
            info!("Poll scheduler stopped");
        }
    }

    /// Part of the scheduler contract alongside start/stop; the service
    /// itself never polls it.
    #[allow(dead_code)]
    pub fn is_running(&self) -> bool {
        self.tick_loop
            .lock()
            .expect("scheduler lock poisoned")
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }
}
