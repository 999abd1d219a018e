//! Artifact removal: delayed deletion, startup sweep, shutdown purge.

use super::VideoDownloader;
use crate::error::Result;
use crate::types::FileId;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

impl VideoDownloader {
    /// Delete the artifact after the retention period
    ///
    /// The timer handle is tracked so shutdown can cancel it.
    pub(crate) async fn schedule_deletion(&self, file_id: FileId, path: PathBuf) {
        let retention = self.config.download.retention;
        let pending = self.pending_deletions.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(retention).await;
            remove_artifact(&path).await;
            pending.lock().await.remove(&file_id);
        });

        debug!(file_id = %file_id, retention_secs = retention.as_secs(), "Scheduled deletion");
        self.pending_deletions.lock().await.insert(file_id, handle);
    }

    /// Number of artifacts currently waiting for their deletion timer
    pub async fn pending_deletion_count(&self) -> usize {
        let mut pending = self.pending_deletions.lock().await;
        pending.retain(|_, handle| !handle.is_finished());
        pending.len()
    }

    /// Abort every pending deletion timer, optionally deleting the artifacts now
    ///
    /// Returns the number of timers that were still pending.
    pub(crate) async fn cancel_pending_deletions(&self, purge: bool) -> usize {
        let drained: Vec<(FileId, tokio::task::JoinHandle<()>)> =
            self.pending_deletions.lock().await.drain().collect();

        let mut cancelled = 0;
        for (file_id, handle) in drained {
            if handle.is_finished() {
                continue;
            }
            handle.abort();
            cancelled += 1;

            if purge {
                let path = file_id.artifact_path(self.config.download_dir());
                remove_artifact(&path).await;
            }
        }
        cancelled
    }

    /// Remove artifacts older than the retention period
    ///
    /// Only `<uuid>.mp4` files are considered; anything else in the download
    /// directory is left alone. Returns the number of files removed.
    pub(crate) async fn sweep_stale(&self) -> Result<usize> {
        let retention = self.config.download.retention;
        let now = SystemTime::now();
        let mut removed = 0;

        let mut entries = tokio::fs::read_dir(self.config.download_dir()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if FileId::from_artifact_path(&path).is_none() {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot read artifact age");
                    continue;
                }
            };

            // Clock skew makes the age unknown; treat it as fresh.
            let age = now.duration_since(modified).unwrap_or_default();
            if age >= retention && remove_artifact(&path).await {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

/// Delete one artifact file, logging the outcome
///
/// Returns `true` if a file was removed. A file that is already gone is not
/// an error.
pub(crate) async fn remove_artifact(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            info!(path = %path.display(), "Deleted artifact");
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to delete artifact");
            false
        }
    }
}

/// Delete whatever a failed fetch left behind (final file and yt-dlp's `.part` file)
pub(crate) async fn remove_partial(path: &Path) {
    remove_artifact(path).await;

    let mut part = path.as_os_str().to_os_string();
    part.push(".part");
    remove_artifact(Path::new(&part)).await;
}
