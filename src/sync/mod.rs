pub mod novelty;
pub mod scheduler;
pub mod store;

pub use novelty::{fingerprint, NoveltyDetector};
pub use scheduler::PollScheduler;
pub use store::{SyncState, SyncStore};
