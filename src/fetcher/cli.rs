//! CLI-based fetcher using the external yt-dlp binary

use super::parser::{ExitStatus, parse_ytdlp_output};
use super::traits::{FetchedVideo, FetcherCapabilities, VideoFetcher};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// CLI-based fetcher using the external yt-dlp binary
///
/// # Examples
///
/// ```no_run
/// use video_dl::fetcher::{CliVideoFetcher, VideoFetcher};
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let fetcher = CliVideoFetcher::new(PathBuf::from("/usr/bin/yt-dlp"), "best".into());
///
/// // Or auto-discover from PATH
/// let fetcher = CliVideoFetcher::from_path("best[ext=mp4]/best")
///     .expect("yt-dlp not found in PATH");
/// ```
pub struct CliVideoFetcher {
    binary_path: PathBuf,
    format: String,
}

impl CliVideoFetcher {
    /// Create a new CLI fetcher with an explicit binary path and format selector
    pub fn new(binary_path: PathBuf, format: String) -> Self {
        Self {
            binary_path,
            format,
        }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Returns `None` if the binary is not found.
    pub fn from_path(format: &str) -> Option<Self> {
        which::which("yt-dlp")
            .ok()
            .map(|path| Self::new(path, format.to_string()))
    }

    /// Command-line arguments for one download
    ///
    /// The title is printed after the file reaches its final location, which
    /// also keeps yt-dlp quiet and stops it from simulating.
    fn build_args(&self, url: &str, destination: &Path, max_size: u64) -> Vec<OsString> {
        vec![
            "--format".into(),
            self.format.clone().into(),
            "--output".into(),
            destination.as_os_str().to_os_string(),
            "--max-filesize".into(),
            max_size.to_string().into(),
            "--no-playlist".into(),
            "--no-warnings".into(),
            "--no-simulate".into(),
            "--print".into(),
            "after_move:title".into(),
            "--".into(),
            url.into(),
        ]
    }
}

#[async_trait]
impl VideoFetcher for CliVideoFetcher {
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        max_size: u64,
    ) -> crate::Result<FetchedVideo> {
        tracing::debug!(
            binary = %self.binary_path.display(),
            destination = %destination.display(),
            "Running yt-dlp"
        );

        let output = Command::new(&self.binary_path)
            .args(self.build_args(url, destination, max_size))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        parse_ytdlp_output(
            &output.stdout,
            &output.stderr,
            ExitStatus::from(output.status.success()),
        )
    }

    fn capabilities(&self) -> FetcherCapabilities {
        FetcherCapabilities { can_fetch: true }
    }

    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }
}
