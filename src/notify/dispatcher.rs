//! Bridges store updates to user-facing notifications.
//!
//! A background task watches the synchronization store; whenever a snapshot
//! is ready it runs the novelty detector and announces each newly appeared
//! match note: always a toast, plus a desktop notification when permission
//! has been granted and the page is hidden.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::feed::MatchNote;
use crate::sync::{fingerprint, NoveltyDetector, SyncState};

use super::{NotificationSink, PageVisibility, PermissionProvider, PermissionStatus};

pub struct MatchNoteNotifier {
    detector: NoveltyDetector,
    sink: Arc<dyn NotificationSink>,
    permission: Arc<dyn PermissionProvider>,
    visibility: Arc<dyn PageVisibility>,
    stagger: Duration,
}

impl MatchNoteNotifier {
    pub fn new(
        sink: Arc<dyn NotificationSink>,
        permission: Arc<dyn PermissionProvider>,
        visibility: Arc<dyn PageVisibility>,
        stagger: Duration,
    ) -> Self {
        MatchNoteNotifier {
            detector: NoveltyDetector::new(),
            sink,
            permission,
            visibility,
            stagger,
        }
    }

    /// Consume store updates until the store is dropped. The first snapshot
    /// only baselines the detector; notes from later snapshots notify.
    pub async fn run(mut self, mut rx: watch::Receiver<SyncState>) {
        loop {
            let novel = self.diff_state(&rx.borrow_and_update());
            if !novel.is_empty() {
                debug!("{} new match note(s)", novel.len());
                self.announce(&novel).await;
            }
            if rx.changed().await.is_err() {
                debug!("Store closed, note notifier exiting");
                return;
            }
        }
    }

    fn diff_state(&mut self, state: &SyncState) -> Vec<MatchNote> {
        if state.loading {
            return Vec::new();
        }
        match &state.snapshot {
            Some(snapshot) => self.detector.observe(&snapshot.match_notes),
            None => Vec::new(),
        }
    }

    /// Announce notes in order, staggered so toasts do not overlap.
    async fn announce(&self, notes: &[MatchNote]) {
        let desktop_ok = self.permission.status() == PermissionStatus::Granted
            && self.visibility.hidden();

        for (idx, note) in notes.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.stagger).await;
            }
            let Some((message, title)) = render_note(note) else {
                warn!(
                    "Skipping notification for incomplete note (match {}, over {}.{})",
                    note.match_id, note.over_no, note.ball_no
                );
                continue;
            };
            let key = fingerprint(note);
            self.sink.show_toast(&message, &key);
            if desktop_ok {
                self.sink.show_desktop(&title, &message, &key);
            }
        }
    }
}

/// Build the toast message and desktop title for a note, or `None` if a
/// display field is missing. Incomplete notes are an expected upstream data
/// quality wrinkle, not an error.
fn render_note(note: &MatchNote) -> Option<(String, String)> {
    if note.team_code.is_empty()
        || note.over_no.is_empty()
        || note.ball_no.is_empty()
        || note.description.is_empty()
    {
        return None;
    }
    let message = format!(
        "{} ({}.{}): {}",
        note.team_code, note.over_no, note.ball_no, note.description
    );
    let title = format!("IPL Update: {}", note.team_code);
    Some((message, title))
}
