//! Traits and types for video fetching

use async_trait::async_trait;
use std::path::Path;

/// Result of a successful fetch
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedVideo {
    /// Title reported by the extractor ("video" when it reports none)
    pub title: String,
}

/// Capabilities of a fetcher implementation
#[derive(Debug, Clone, Copy)]
pub struct FetcherCapabilities {
    /// Can download videos at all
    pub can_fetch: bool,
}

/// Trait for downloading a video from a page URL into a local file
///
/// Implementations can use external binaries, pure Rust libraries, or provide
/// stub functionality for graceful degradation.
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Download the video behind `url` into `destination`
    ///
    /// `max_size` is a hint in bytes; implementations should refuse to
    /// download larger files. The caller checks the result on disk either way,
    /// so a fetch that returns `Ok` without creating `destination` is treated
    /// as "nothing downloaded".
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The external binary fails to execute (for CLI implementations)
    /// - The extractor reports a failure (unsupported site, unavailable video)
    /// - The operation is not supported (for stub implementations)
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        max_size: u64,
    ) -> crate::Result<FetchedVideo>;

    /// Query capabilities of this fetcher
    fn capabilities(&self) -> FetcherCapabilities;

    /// Human-readable name for logging and the health endpoint
    fn name(&self) -> &'static str;
}
