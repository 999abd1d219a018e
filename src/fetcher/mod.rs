//! Video fetching
//!
//! This module provides a trait-based architecture for turning a source page
//! URL into a local video file. The production implementation drives an
//! external `yt-dlp` binary; a stub implementation provides graceful
//! degradation when the binary is unavailable.
//!
//! ## Architecture
//!
//! The core abstraction is the [`VideoFetcher`] trait. Two implementations are
//! provided:
//!
//! - [`CliVideoFetcher`]: Runs the external `yt-dlp` binary
//! - [`NoOpVideoFetcher`]: Stub implementation when yt-dlp is unavailable
//!
//! ## Usage
//!
//! ```no_run
//! use video_dl::fetcher::{CliVideoFetcher, VideoFetcher};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = CliVideoFetcher::from_path("best[ext=mp4]/best")
//!         .expect("yt-dlp binary not found");
//!
//!     let video = fetcher
//!         .fetch(
//!             "https://example.com/watch?v=1",
//!             Path::new("downloads/clip.mp4"),
//!             50 * 1024 * 1024,
//!         )
//!         .await?;
//!     println!("Downloaded: {}", video.title);
//!
//!     Ok(())
//! }
//! ```

mod cli;
mod noop;
mod parser;
mod traits;

pub use cli::CliVideoFetcher;
pub use noop::NoOpVideoFetcher;
pub use parser::{ExitStatus, parse_ytdlp_output};
pub use traits::{FetchedVideo, FetcherCapabilities, VideoFetcher};

use crate::config::ToolsConfig;
use std::sync::Arc;

/// Pick a fetcher according to the tools configuration
///
/// An explicit `ytdlp_path` wins; otherwise PATH is searched when allowed;
/// otherwise the no-op fetcher is returned.
pub fn fetcher_from_config(tools: &ToolsConfig) -> Arc<dyn VideoFetcher> {
    if let Some(ref path) = tools.ytdlp_path {
        Arc::new(CliVideoFetcher::new(path.clone(), tools.format.clone()))
    } else if tools.search_path {
        CliVideoFetcher::from_path(&tools.format)
            .map(|f| Arc::new(f) as Arc<dyn VideoFetcher>)
            .unwrap_or_else(|| Arc::new(NoOpVideoFetcher))
    } else {
        Arc::new(NoOpVideoFetcher)
    }
}
