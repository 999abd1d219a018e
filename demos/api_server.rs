//! HTTP API server example
//!
//! Runs the download service with Swagger UI enabled on localhost.
//!
//! After starting, you can:
//! - View Swagger UI at http://localhost:8000/swagger-ui
//! - Download a video via POST http://localhost:8000/api/download
//! - Fetch the stored file via GET http://localhost:8000/api/file/{file_id}

use std::net::SocketAddr;
use std::sync::Arc;
use video_dl::VideoDownloader;
use video_dl::api::start_api_server;
use video_dl::config::{ApiConfig, Config, DownloadConfig, ServerIntegrationConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let api_config = ApiConfig {
        bind_address: "127.0.0.1:8000".parse::<SocketAddr>()?,
        swagger_ui: true,
        ..Default::default()
    };

    let config = Config {
        download: DownloadConfig {
            download_dir: "downloads".into(),
            max_file_size: 500 * 1024 * 1024,
            ..Default::default()
        },
        server: ServerIntegrationConfig { api: api_config },
        ..Default::default()
    };

    let downloader = Arc::new(VideoDownloader::new(config.clone()).await?);
    let config_arc = Arc::new(config);

    println!("🚀 Starting video-dl API server");
    println!("📖 Swagger UI: http://localhost:8000/swagger-ui");
    println!("🔧 Fetcher: {}", downloader.fetcher_name());
    println!();
    println!("Example commands:");
    println!("  curl -X POST http://localhost:8000/api/download \\");
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"url\": \"https://www.youtube.com/watch?v=dQw4w9WgXcQ\"}}'");
    println!();
    println!("  curl -OJ http://localhost:8000/api/file/<file_id>");
    println!();

    start_api_server(downloader, config_arc).await?;

    Ok(())
}
