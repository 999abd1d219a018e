//! # video-dl
//!
//! Video download mini-app: the page-side download controller and the
//! HTTP service it talks to.
//!
//! ## Design Philosophy
//!
//! video-dl is designed to be:
//! - **Small** - One request downloads one video; one link fetches it
//! - **Capability-driven** - The controller only sees a [`controller::HostEnvironment`]
//!   and a [`controller::DownloadApi`], so any front end can drive it
//! - **Pluggable** - The service downloads through a [`fetcher::VideoFetcher`]
//!   (yt-dlp by default)
//! - **Self-cleaning** - Stored files expire after a retention period
//!
//! ## Quick Start
//!
//! ```no_run
//! use video_dl::{Config, VideoDownloader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let downloader = Arc::new(VideoDownloader::new(config).await?);
//!
//!     let server = downloader.spawn_api_server();
//!     video_dl::run_with_shutdown((*downloader).clone()).await?;
//!     server.abort();
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Page-side download controller
pub mod controller;
/// Download service (jobs, artifact lookup, expiry)
pub mod downloader;
/// Error types
pub mod error;
/// Video fetching through yt-dlp
pub mod fetcher;
/// Core types shared by the service and the controller
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use controller::{DownloadController, HostEnvironment, HttpDownloadApi, SubmitOutcome};
pub use downloader::VideoDownloader;
pub use error::{DownloadError, Error, Result, ToHttpStatus, TransportError, ValidationError};
pub use fetcher::{CliVideoFetcher, NoOpVideoFetcher, VideoFetcher};
pub use types::{DownloadRequest, DownloadResponse, DownloadedVideo, FileId, HealthStatus};

/// Serve until the process is asked to stop, then shut the downloader down.
///
/// Ctrl+C stops the service everywhere; on unix SIGTERM does too, which is
/// what container runtimes send. Shutdown refuses new jobs and, when
/// configured, purges the stored artifacts.
///
/// # Example
///
/// ```no_run
/// use video_dl::{VideoDownloader, Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::default();
///     let downloader = VideoDownloader::new(config).await?;
///
///     run_with_shutdown(downloader).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(downloader: VideoDownloader) -> Result<()> {
    wait_for_signal().await;
    downloader.shutdown().await
}

/// Resolves on the first stop request.
///
/// A listener that cannot be installed is logged and never fires, so the
/// other one can still stop the service.
async fn wait_for_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C listener unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM listener unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!(signal = "SIGINT", "Stop requested, shutting down video-dl"),
        () = terminate => tracing::info!(signal = "SIGTERM", "Stop requested, shutting down video-dl"),
    }
}
