//! video-dl server binary
//!
//! Reads configuration from the environment (and `.env`), serves the
//! mini-app and its API, and shuts down cleanly on SIGINT/SIGTERM.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use video_dl::{Config, VideoDownloader, run_with_shutdown};

const DEFAULT_LOG_FILTER: &str = "video_dl=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        address = %config.server.api.bind_address,
        download_dir = %config.download.download_dir.display(),
        "Configuration loaded"
    );

    let downloader = Arc::new(VideoDownloader::new(config).await?);
    let mut server = downloader.spawn_api_server();

    tokio::select! {
        result = &mut server => {
            // The server only returns on a bind or serve failure
            downloader.shutdown().await?;
            result??;
        }
        result = run_with_shutdown((*downloader).clone()) => {
            result?;
            server.abort();
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
