//! Detects match notes that have newly appeared between snapshots.
//!
//! The first snapshot ever observed only seeds the baseline — notifying for
//! every historical note on startup would bury the user. From then on, each
//! snapshot's notes are diffed against the previously observed fingerprint
//! set and only the newcomers are emitted, in snapshot order.

use std::collections::HashSet;

use crate::feed::MatchNote;

/// Identity is derived from the scoring position plus a prefix of the
/// commentary text, not from object identity, so re-fetched copies of the
/// same note never re-notify.
const DESCRIPTION_PREFIX_CHARS: usize = 30;

/// Stable identity key for a match note.
pub fn fingerprint(note: &MatchNote) -> String {
    let prefix: String = note.description.chars().take(DESCRIPTION_PREFIX_CHARS).collect();
    format!(
        "{}-{}-{}-{}-{}",
        note.match_id, note.over_no, note.ball_no, note.team_id, prefix
    )
}

pub struct NoveltyDetector {
    observed: HashSet<String>,
    baselined: bool,
}

impl NoveltyDetector {
    pub fn new() -> Self {
        NoveltyDetector {
            observed: HashSet::new(),
            baselined: false,
        }
    }

    /// Diff one snapshot's notes against everything observed so far.
    ///
    /// Returns the newly appeared notes in their original order, at most one
    /// per fingerprint. Afterwards the observed set equals exactly this
    /// snapshot's fingerprint set.
    pub fn observe(&mut self, notes: &[MatchNote]) -> Vec<MatchNote> {
        let current: HashSet<String> = notes.iter().map(fingerprint).collect();

        if !self.baselined {
            self.baselined = true;
            self.observed = current;
            return Vec::new();
        }

        let mut novel = Vec::new();
        for note in notes {
            // insert() doubles as the in-pass dedup: a fingerprint repeated
            // within one snapshot is emitted once.
            if self.observed.insert(fingerprint(note)) {
                novel.push(note.clone());
            }
        }

        self.observed = current;
        novel
    }
}

impl Default for NoveltyDetector {
    fn default() -> Self {
        Self::new()
    }
}
