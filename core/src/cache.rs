//! Freshness policy around the on-disk snapshot.
//!
//! * no snapshot: bootstrap from the consolidated mirror (single fetch) and persist it.
//! * snapshot older than `max_age`: refetch all five listings and overwrite it.
//! * otherwise: read it back, no network activity.
//!
//! The snapshot is only replaced after a fully successful fetch and merge.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use manuf_common::config::Config;
use manuf_common::{ManufError, Records, Result};
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::codec;
use crate::source::{self, RecordSource};

/// State of the snapshot relative to the freshness threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Missing,
    Fresh { age: Duration },
    Stale { age: Duration },
}

pub struct CacheManager {
    source: Arc<dyn RecordSource>,
    cache_path: PathBuf,
    mirror_url: String,
    listing_urls: Vec<String>,
    max_age: Duration,
    deadline: Duration,
    serve_stale_on_error: bool,
}

impl CacheManager {
    pub fn new(cfg: &Config, source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            cache_path: cfg.cache_path.clone(),
            mirror_url: cfg.mirror_url.clone(),
            listing_urls: cfg.listing_urls.clone(),
            max_age: cfg.max_age,
            deadline: cfg.deadline,
            serve_stale_on_error: cfg.serve_stale_on_error,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Returns the cached records, refreshing the snapshot first if it is missing or stale.
    pub async fn load_or_refresh(&self) -> Result<Records> {
        self.load_or_refresh_at(SystemTime::now()).await
    }

    /// [`CacheManager::load_or_refresh`] with an explicit notion of "now".
    pub async fn load_or_refresh_at(&self, now: SystemTime) -> Result<Records> {
        match self.freshness_at(now)? {
            Freshness::Missing => {
                info!(path = ?self.cache_path, "no cache found, creating");
                self.bootstrap().await
            }
            Freshness::Stale { age } => {
                info!(
                    age_days = age.as_secs() / 86_400,
                    "cached records are older than {} days, renewing content",
                    self.max_age.as_secs() / 86_400
                );
                match self.refresh().await {
                    Ok(records) => Ok(records),
                    Err(err) if self.serve_stale_on_error => {
                        warn!(error = %err, "refresh failed, serving stale records");
                        self.load().await
                    }
                    Err(err) => Err(err),
                }
            }
            Freshness::Fresh { age } => {
                debug!(age_secs = age.as_secs(), "cache is fresh");
                self.load().await
            }
        }
    }

    pub fn freshness_at(&self, now: SystemTime) -> Result<Freshness> {
        let metadata = match std::fs::metadata(&self.cache_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Freshness::Missing),
            Err(e) => {
                return Err(ManufError::io(
                    format!("failed to check previous cache {:?}", self.cache_path),
                    e,
                ));
            }
        };
        let modified = metadata.modified().map_err(|e| {
            ManufError::io(format!("failed to read modification time of {:?}", self.cache_path), e)
        })?;

        // A timestamp in the future counts as brand new.
        let age = now.duration_since(modified).unwrap_or_default();
        if is_stale(age, self.max_age) {
            Ok(Freshness::Stale { age })
        } else {
            Ok(Freshness::Fresh { age })
        }
    }

    /// Reads the snapshot as is, without any freshness check.
    pub async fn load(&self) -> Result<Records> {
        let path = self.cache_path.clone();
        let records = blocking(move || codec::read_file(&path)).await?;
        debug!(records = records.len(), "loaded records from cache");
        Ok(records)
    }

    /// Fetches all listings concurrently and overwrites the snapshot.
    pub async fn refresh(&self) -> Result<Records> {
        let records =
            aggregate::fetch_all(Arc::clone(&self.source), &self.listing_urls, self.deadline)
                .await?;
        self.persist(records).await
    }

    /// Populates a missing snapshot from the consolidated mirror.
    pub async fn bootstrap(&self) -> Result<Records> {
        let records = source::fetch_with_deadline(&*self.source, &self.mirror_url, self.deadline)
            .await
            .map_err(|e| e.for_source(&self.mirror_url))?;
        self.persist(records).await
    }

    async fn persist(&self, records: Records) -> Result<Records> {
        let path = self.cache_path.clone();
        let records = blocking(move || codec::write_file(&records, &path).map(|()| records)).await?;
        info!(path = ?self.cache_path, records = records.len(), "cache written");
        Ok(records)
    }
}

/// Strictly older than `max_age`; a snapshot exactly `max_age` old is still fresh.
pub fn is_stale(age: Duration, max_age: Duration) -> bool {
    age > max_age
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_) => Err(ManufError::Cancelled),
    }
}
