//! Feed document loading.
//!
//! A source is either an `http(s)://` URL, fetched with one GET, or a path
//! on disk. [`FeedLoader::load`] is all-or-nothing: any failure yields the
//! mock document, never a partial merge, and nothing is retried.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::LoadError;
use crate::models::{ActiveIncident, FeedData};

/// Where a feed document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(String),
    File(PathBuf),
}

impl FeedSource {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            FeedSource::Http(trimmed.to_string())
        } else {
            FeedSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn name(&self) -> String {
        match self {
            FeedSource::Http(url) => url.clone(),
            FeedSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
}

impl FeedLoader {
    pub fn new() -> Self {
        Self::with_client(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        )
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Load the feed, substituting the mock document on any failure.
    pub async fn load(&self, source: &FeedSource) -> FeedData {
        match self.fetch_feed(source).await {
            Ok(feed) => {
                tracing::info!(
                    source = %source.name(),
                    incidents = feed.incidents.len(),
                    skills = feed.skills.len(),
                    "feed data loaded"
                );
                feed
            }
            Err(e) => {
                tracing::warn!(error = %e, "feed unavailable, using mock data");
                FeedData::mock(Utc::now())
            }
        }
    }

    pub async fn fetch_feed(&self, source: &FeedSource) -> Result<FeedData, LoadError> {
        let text = self.fetch_text(source).await?;
        serde_json::from_str(&text).map_err(|err| LoadError::Parse {
            source_name: source.name(),
            err,
        })
    }

    /// Probe the active-incident document. Absence, failure and
    /// `active: false` all mean "no active incident".
    pub async fn check_active_incident(&self, source: &FeedSource) -> Option<ActiveIncident> {
        let text = match self.fetch_text(source).await {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(error = %e, "no active incident document");
                return None;
            }
        };
        let incident: ActiveIncident = serde_json::from_str(&text).ok()?;
        incident.active.then_some(incident)
    }

    async fn fetch_text(&self, source: &FeedSource) -> Result<String, LoadError> {
        match source {
            FeedSource::Http(url) => {
                let resp = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|err| LoadError::Network {
                        source_name: url.clone(),
                        err,
                    })?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        source_name: url.clone(),
                        status,
                    });
                }
                resp.text().await.map_err(|err| LoadError::Network {
                    source_name: url.clone(),
                    err,
                })
            }
            FeedSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|err| LoadError::Io {
                        source_name: path.display().to_string(),
                        err,
                    })
            }
        }
    }
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self::new()
    }
}
