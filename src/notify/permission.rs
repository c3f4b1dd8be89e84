//! Tri-state notification permission, mirroring the platform permission
//! model: a one-shot request can move `Default` to `Granted` or `Denied`,
//! and a decided state is never re-requested.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Default,
}

#[async_trait]
pub trait PermissionProvider: Send + Sync {
    fn status(&self) -> PermissionStatus;

    /// Ask the platform for permission. Only meaningful from `Default`.
    async fn request(&self) -> Result<PermissionStatus>;
}

/// One-shot permission resolution: requests only when the state is still
/// `Default`, and swallows a failing request (the state simply stays
/// `Default` and desktop notifications stay off).
pub async fn ensure_permission(provider: &dyn PermissionProvider) -> PermissionStatus {
    match provider.status() {
        PermissionStatus::Default => match provider.request().await {
            Ok(status) => {
                info!("Notification permission resolved: {:?}", status);
                status
            }
            Err(e) => {
                warn!("Notification permission request failed: {e:#}");
                PermissionStatus::Default
            }
        },
        decided => decided,
    }
}

/// Permission backed by service configuration: requesting resolves to
/// whatever the operator configured at startup.
pub struct ConfigPermission {
    grant: bool,
    status: Mutex<PermissionStatus>,
}

impl ConfigPermission {
    pub fn new(grant: bool) -> Self {
        ConfigPermission {
            grant,
            status: Mutex::new(PermissionStatus::Default),
        }
    }
}

#[async_trait]
impl PermissionProvider for ConfigPermission {
    fn status(&self) -> PermissionStatus {
        *self.status.lock().expect("permission lock poisoned")
    }

    async fn request(&self) -> Result<PermissionStatus> {
        let mut status = self.status.lock().expect("permission lock poisoned");
        if *status == PermissionStatus::Default {
            *status = if self.grant {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
        }
        Ok(*status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        status: PermissionStatus,
        outcome: Option<PermissionStatus>,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl PermissionProvider for Scripted {
        fn status(&self) -> PermissionStatus {
            self.status
        }

        async fn request(&self) -> Result<PermissionStatus> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.outcome.ok_or_else(|| anyhow!("platform refused"))
        }
    }

    #[tokio::test]
    async fn decided_state_is_never_rerequested() {
        for decided in [PermissionStatus::Granted, PermissionStatus::Denied] {
            let provider = Scripted {
                status: decided,
                outcome: Some(PermissionStatus::Granted),
                requests: AtomicUsize::new(0),
            };
            assert_eq!(ensure_permission(&provider).await, decided);
            assert_eq!(provider.requests.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn default_state_requests_once() {
        let provider = Scripted {
            status: PermissionStatus::Default,
            outcome: Some(PermissionStatus::Granted),
            requests: AtomicUsize::new(0),
        };
        assert_eq!(
            ensure_permission(&provider).await,
            PermissionStatus::Granted
        );
        assert_eq!(provider.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_request_leaves_default() {
        let provider = Scripted {
            status: PermissionStatus::Default,
            outcome: None,
            requests: AtomicUsize::new(0),
        };
        assert_eq!(
            ensure_permission(&provider).await,
            PermissionStatus::Default
        );
    }

    #[tokio::test]
    async fn config_permission_resolves_per_flag() {
        let granting = ConfigPermission::new(true);
        assert_eq!(granting.status(), PermissionStatus::Default);
        assert_eq!(
            ensure_permission(&granting).await,
            PermissionStatus::Granted
        );
        assert_eq!(granting.status(), PermissionStatus::Granted);

        let denying = ConfigPermission::new(false);
        assert_eq!(ensure_permission(&denying).await, PermissionStatus::Denied);
    }
}
