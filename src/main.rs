use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod config;
mod dashboard;
mod feed;
mod notify;
mod sync;

use config::Config;
use dashboard::AppState;
use feed::{FeedClient, SnapshotSource};
use notify::{
    ensure_permission, permission::ConfigPermission, AlwaysHidden, MatchNoteNotifier,
    PermissionStatus, ToastLog,
};
use sync::{PollScheduler, SyncStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    info!("Feed endpoint: {}", config.feed_url);

    // Build the snapshot pipeline: feed client -> store -> scheduler
    let source: Arc<dyn SnapshotSource> = Arc::new(FeedClient::new(&config.feed_url)?);
    let store = Arc::new(SyncStore::new(source));
    let scheduler = Arc::new(PollScheduler::new(
        Arc::clone(&store),
        Duration::from_secs(config.poll_interval_secs),
    ));

    // Notification wiring: resolve permission once, then watch the store
    let toasts = Arc::new(ToastLog::new());
    let permission = Arc::new(ConfigPermission::new(config.desktop_notifications));
    let resolved = ensure_permission(permission.as_ref()).await;
    if resolved == PermissionStatus::Granted {
        info!("Desktop notifications enabled");
    }

    let notifier = MatchNoteNotifier::new(
        Arc::clone(&toasts) as Arc<dyn notify::NotificationSink>,
        permission,
        Arc::new(AlwaysHidden),
        Duration::from_millis(config.toast_stagger_ms),
    );
    tokio::spawn(notifier.run(store.subscribe()));

    scheduler.start();

    // Start the dashboard HTTP server
    let app = dashboard::router(AppState {
        state: store.subscribe(),
        toasts,
    });
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run dashboard server (blocks until shutdown)
    axum::serve(listener, app).await?;

    scheduler.stop();
    Ok(())
}
