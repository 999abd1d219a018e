//! Shared test helpers for creating VideoDownloader instances in tests.

use crate::config::Config;
use crate::downloader::VideoDownloader;
use crate::fetcher::{FetchedVideo, FetcherCapabilities, VideoFetcher};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::tempdir;

/// What a [`FakeFetcher`] does when asked to fetch
#[derive(Clone, Debug)]
pub(crate) enum FakeBehavior {
    /// Write `len` bytes to the destination and report `title`
    Write { len: usize, title: String },
    /// Return success without creating a file
    NoOutput,
    /// Leave a `.part` file behind and fail with a fetch error
    Fail { reason: String },
}

/// In-process fetcher standing in for yt-dlp
pub(crate) struct FakeFetcher {
    behavior: FakeBehavior,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub(crate) fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fetcher that writes `len` bytes titled "Test Clip"
    pub(crate) fn writing(len: usize) -> Self {
        Self::new(FakeBehavior::Write {
            len,
            title: "Test Clip".into(),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoFetcher for FakeFetcher {
    async fn fetch(
        &self,
        _url: &str,
        destination: &Path,
        _max_size: u64,
    ) -> crate::Result<FetchedVideo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            FakeBehavior::Write { len, title } => {
                tokio::fs::write(destination, vec![0u8; *len]).await?;
                Ok(FetchedVideo {
                    title: title.clone(),
                })
            }
            FakeBehavior::NoOutput => Ok(FetchedVideo {
                title: "video".into(),
            }),
            FakeBehavior::Fail { reason } => {
                let mut part = destination.as_os_str().to_os_string();
                part.push(".part");
                tokio::fs::write(Path::new(&part), b"partial").await?;
                Err(crate::error::DownloadError::FetchFailed {
                    reason: reason.clone(),
                }
                .into())
            }
        }
    }

    fn capabilities(&self) -> FetcherCapabilities {
        FetcherCapabilities { can_fetch: true }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Test configuration rooted in `dir` with a one-hour retention
pub(crate) fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.download.download_dir = dir.join("downloads");
    config.download.retention = Duration::from_secs(3600);
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    config.server.api.static_dir = dir.join("static");
    config.server.api.index_file = dir.join("index.html");
    config
}

/// Helper to create a test VideoDownloader backed by `fetcher`.
/// Returns the downloader and the tempdir (which must be kept alive).
pub(crate) async fn create_test_downloader(
    fetcher: Arc<FakeFetcher>,
) -> (VideoDownloader, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let config = test_config(temp_dir.path());
    let downloader = VideoDownloader::with_fetcher(config, fetcher).await.unwrap();
    (downloader, temp_dir)
}

/// Same as [`create_test_downloader`] with a custom configuration tweak
pub(crate) async fn create_test_downloader_with(
    fetcher: Arc<FakeFetcher>,
    tweak: impl FnOnce(&mut Config),
) -> (VideoDownloader, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let mut config = test_config(temp_dir.path());
    tweak(&mut config);
    let downloader = VideoDownloader::with_fetcher(config, fetcher).await.unwrap();
    (downloader, temp_dir)
}
