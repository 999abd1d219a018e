//! No-op fetcher for graceful degradation

use super::traits::{FetchedVideo, FetcherCapabilities, VideoFetcher};
use async_trait::async_trait;
use std::path::Path;

/// No-op fetcher used when yt-dlp is unavailable
///
/// Every fetch returns `Error::NotSupported`, so the API keeps serving health
/// checks and existing artifacts while download requests fail with 501.
///
/// # Examples
///
/// ```
/// use video_dl::fetcher::{NoOpVideoFetcher, VideoFetcher};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = NoOpVideoFetcher;
/// let result = fetcher
///     .fetch("https://example.com/v", Path::new("v.mp4"), 1024)
///     .await;
/// assert!(result.is_err());
/// # Ok(())
/// # }
/// ```
pub struct NoOpVideoFetcher;

#[async_trait]
impl VideoFetcher for NoOpVideoFetcher {
    async fn fetch(
        &self,
        _url: &str,
        _destination: &Path,
        _max_size: u64,
    ) -> crate::Result<FetchedVideo> {
        Err(crate::Error::NotSupported(
            "video downloads require the external yt-dlp binary. \
             Configure YTDLP_PATH or ensure yt-dlp is in PATH."
                .into(),
        ))
    }

    fn capabilities(&self) -> FetcherCapabilities {
        FetcherCapabilities { can_fetch: false }
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
