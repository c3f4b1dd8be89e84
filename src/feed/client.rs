use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::models::Snapshot;

/// Source of tournament snapshots. The sync core treats this as a black box:
/// it only ever sees a complete `Snapshot` or a failure.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot>;
}

/// Ways a feed round-trip can fail. The store renders all of these into the
/// same user-visible error string; the distinction matters only for logs.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("feed returned status {0}")]
    Status(StatusCode),
    #[error("failed to decode feed body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the aggregated IPL data endpoint.
///
/// The endpoint serves one clean JSON document per request (the JSONP
/// unwrapping of the raw tournament feeds happens upstream of this service).
pub struct FeedClient {
    http: Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FeedClient {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for FeedClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        debug!("Fetching snapshot from {}", self.url);

        // no-store so every poll hits the live feed, never a cached body
        let resp = self
            .http
            .get(&self.url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await
            .map_err(FeedError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status).into());
        }

        let snapshot = resp
            .json::<Snapshot>()
            .await
            .map_err(FeedError::Decode)?;

        debug!(
            "Snapshot fetched: {} standings rows, {} schedule days, {} match notes",
            snapshot.points_table.len(),
            snapshot.schedule.len(),
            snapshot.match_notes.len()
        );
        Ok(snapshot)
    }
}
