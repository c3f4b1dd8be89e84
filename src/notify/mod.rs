pub mod dispatcher;
pub mod permission;
pub mod sinks;

pub use dispatcher::MatchNoteNotifier;
pub use permission::{ensure_permission, PermissionProvider, PermissionStatus};
pub use sinks::{ToastLog, ToastRecord};

/// Delivery surface for notifications. The service implements this with
/// [`ToastLog`]; tests substitute recorders.
pub trait NotificationSink: Send + Sync {
    /// Transient in-app notification. Duplicate keys are collapsed by the
    /// sink, so re-dispatching the same note is harmless.
    fn show_toast(&self, message: &str, key: &str);

    /// Native notification for users not currently looking at the page.
    /// Notification systems deduplicate by `tag`.
    fn show_desktop(&self, title: &str, body: &str, tag: &str);
}

/// Whether the page consuming this data is currently visible to the user.
/// Desktop notifications only make sense when it is not.
pub trait PageVisibility: Send + Sync {
    fn hidden(&self) -> bool;
}

/// A headless service has no foreground page, so every note qualifies for
/// desktop delivery.
pub struct AlwaysHidden;

impl PageVisibility for AlwaysHidden {
    fn hidden(&self) -> bool {
        true
    }
}
