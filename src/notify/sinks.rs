//! In-memory notification sink for the service.
//!
//! Plays the role a toast library plays in a browser app: keeps a bounded
//! ring of recent toasts, collapses duplicate keys, and exposes the ring to
//! the dashboard. Desktop notifications have no native surface in a headless
//! process, so they are logged with their dedup tag.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::NotificationSink;

const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ToastRecord {
    pub key: String,
    pub message: String,
    pub issued_at: DateTime<Utc>,
}

pub struct ToastLog {
    inner: Mutex<ToastLogInner>,
    capacity: usize,
}

struct ToastLogInner {
    entries: VecDeque<ToastRecord>,
    keys: HashSet<String>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ToastLog {
            inner: Mutex::new(ToastLogInner {
                entries: VecDeque::new(),
                keys: HashSet::new(),
            }),
            capacity,
        }
    }

    /// Recent toasts, newest first.
    pub fn recent(&self) -> Vec<ToastRecord> {
        let inner = self.inner.lock().expect("toast log lock poisoned");
        inner.entries.iter().rev().cloned().collect()
    }
}

impl Default for ToastLog {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for ToastLog {
    fn show_toast(&self, message: &str, key: &str) {
        let mut inner = self.inner.lock().expect("toast log lock poisoned");
        if !inner.keys.insert(key.to_string()) {
            return; // already showing this toast
        }
        inner.entries.push_back(ToastRecord {
            key: key.to_string(),
            message: message.to_string(),
            issued_at: Utc::now(),
        });
        if inner.entries.len() > self.capacity {
            if let Some(evicted) = inner.entries.pop_front() {
                inner.keys.remove(&evicted.key);
            }
        }
        info!("Toast [{}]: {}", key, message);
    }

    fn show_desktop(&self, title: &str, body: &str, tag: &str) {
        info!("Desktop notification [{}] {}: {}", tag, title, body);
    }
}
