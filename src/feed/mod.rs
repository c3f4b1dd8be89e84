pub mod client;
pub mod models;

pub use client::{FeedClient, FeedError, SnapshotSource};
pub use models::{MatchNote, ScheduleDay, ScheduleMatch, Snapshot, StandingsEntry};
