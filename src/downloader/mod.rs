//! Download service behind `/api/download` and `/api/file/{id}`.
//!
//! The `VideoDownloader` struct and its methods are organized by concern:
//! - this module - construction, job execution, artifact lookup, shutdown
//! - [`cleanup`] - delayed deletion, startup sweep, shutdown purge

mod cleanup;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::error::{DownloadError, Error, Result};
use crate::fetcher::{VideoFetcher, fetcher_from_config};
use crate::types::{DownloadedVideo, FileId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use url::Url;

/// Download service instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct VideoDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Fetcher that produces the artifact files (trait object for pluggable implementations)
    pub(crate) fetcher: Arc<dyn VideoFetcher>,
    /// Flag to indicate whether new jobs are accepted (set to false during shutdown)
    pub(crate) accepting_new: Arc<AtomicBool>,
    /// Deletion timers for artifacts that are still available
    pub(crate) pending_deletions: Arc<tokio::sync::Mutex<HashMap<FileId, JoinHandle<()>>>>,
}

impl VideoDownloader {
    /// Create a new VideoDownloader instance
    ///
    /// Picks the fetcher from the tools configuration (explicit yt-dlp path,
    /// PATH search, or the no-op fallback) and then behaves like
    /// [`VideoDownloader::with_fetcher`].
    pub async fn new(config: Config) -> Result<Self> {
        let fetcher = fetcher_from_config(&config.tools);
        Self::with_fetcher(config, fetcher).await
    }

    /// Create a VideoDownloader with an explicit fetcher
    ///
    /// Creates the download directory and removes artifacts left behind by a
    /// previous process once they are older than the retention period.
    pub async fn with_fetcher(config: Config, fetcher: Arc<dyn VideoFetcher>) -> Result<Self> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.download.download_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create download directory '{}': {}",
                        config.download.download_dir.display(),
                        e
                    ),
                ))
            })?;

        let caps = fetcher.capabilities();
        tracing::info!(
            fetcher = fetcher.name(),
            can_fetch = caps.can_fetch,
            "Video fetcher initialized"
        );

        let downloader = Self {
            config: Arc::new(config),
            fetcher,
            accepting_new: Arc::new(AtomicBool::new(true)),
            pending_deletions: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
        };

        match downloader.sweep_stale().await {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Removed stale artifacts from previous run"),
            Err(e) => tracing::warn!(error = %e, "Failed to sweep stale artifacts"),
        }

        Ok(downloader)
    }

    /// Shared configuration
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Name of the active fetcher implementation
    pub fn fetcher_name(&self) -> &'static str {
        self.fetcher.name()
    }

    /// Whether new jobs are accepted
    pub fn is_accepting(&self) -> bool {
        self.accepting_new.load(Ordering::SeqCst)
    }

    /// Run one download job
    ///
    /// Allocates a fresh [`FileId`], runs the fetcher into
    /// `{download_dir}/{file_id}.mp4`, enforces the size limit and schedules
    /// the artifact for deletion after the retention period.
    ///
    /// # Errors
    ///
    /// - [`Error::ShuttingDown`] once [`VideoDownloader::shutdown`] ran
    /// - [`Error::InvalidUrl`] for anything but an absolute http(s) URL
    /// - [`DownloadError::NoOutput`] when the fetcher produced no file
    /// - [`DownloadError::TooLarge`] when the file exceeds `max_file_size`
    /// - any error returned by the fetcher
    pub async fn download(&self, url: &str) -> Result<DownloadedVideo> {
        if !self.is_accepting() {
            return Err(Error::ShuttingDown);
        }

        let url = validate_source_url(url)?;
        let file_id = FileId::new();
        let path = file_id.artifact_path(self.config.download_dir());
        let limit = self.config.download.max_file_size;

        tracing::info!(file_id = %file_id, url = %url, "Starting download");

        let fetched = match self.fetcher.fetch(url.as_str(), &path, limit).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(file_id = %file_id, error = %e, "Fetch failed");
                cleanup::remove_partial(&path).await;
                return Err(e);
            }
        };

        let size = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(file_id = %file_id, "Fetcher produced no file");
                cleanup::remove_partial(&path).await;
                return Err(DownloadError::NoOutput {
                    url: url.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        if size > limit {
            tracing::warn!(file_id = %file_id, size, limit, "Downloaded file exceeds size limit");
            cleanup::remove_artifact(&path).await;
            return Err(DownloadError::TooLarge { size, limit }.into());
        }

        self.schedule_deletion(file_id, path.clone()).await;

        tracing::info!(
            file_id = %file_id,
            size,
            title = %fetched.title,
            "Download complete"
        );

        Ok(DownloadedVideo {
            file_id,
            title: fetched.title,
            size,
            path,
        })
    }

    /// Resolve an artifact id from a request path to its file
    ///
    /// Ids that are not UUIDs never touch the file system, so a request can
    /// only address files inside the download directory.
    pub async fn file_path(&self, file_id: &str) -> Result<PathBuf> {
        let not_found = || Error::NotFound(format!("file {}", file_id));

        let id: FileId = file_id.parse().map_err(|_| not_found())?;
        let path = id.artifact_path(self.config.download_dir());

        if tokio::fs::try_exists(&path).await? {
            Ok(path)
        } else {
            Err(not_found())
        }
    }

    /// Gracefully shut down the service
    ///
    /// Stops accepting jobs and cancels pending deletion timers. When
    /// `purge_on_shutdown` is set, the artifacts those timers guarded are
    /// deleted immediately, since no timer will be around to remove them.
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("Initiating graceful shutdown");

        self.accepting_new.store(false, Ordering::SeqCst);
        tracing::info!("Stopped accepting new downloads");

        let purge = self.config.download.purge_on_shutdown;
        let cancelled = self.cancel_pending_deletions(purge).await;
        tracing::info!(cancelled, purged = purge, "Cancelled pending deletions");

        Ok(())
    }

    /// Spawn the REST API server in a background task
    ///
    /// The server uses the bind address from this downloader's configuration.
    pub fn spawn_api_server(self: &Arc<Self>) -> JoinHandle<Result<()>> {
        let downloader = Arc::clone(self);
        let config = Arc::clone(&self.config);
        tokio::spawn(async move { crate::api::start_api_server(downloader, config).await })
    }
}

/// Accept only absolute http(s) URLs with a host
pub(crate) fn validate_source_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(Error::InvalidUrl(format!("{}: missing host", raw))),
        scheme => Err(Error::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw, scheme
        ))),
    }
}
