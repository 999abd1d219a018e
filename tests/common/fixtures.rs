//! Fakes and a real in-process server for end-to-end tests

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use video_dl::controller::{HostEnvironment, ImpactStyle, NotificationKind, ThemeParams};
use video_dl::error::DownloadError;
use video_dl::fetcher::{FetchedVideo, FetcherCapabilities, VideoFetcher};
use video_dl::{Config, VideoDownloader};

/// Fetcher that writes a fixed number of bytes, or fails with a reason
pub struct ScriptedFetcher {
    pub len: usize,
    pub title: String,
    pub failure: Option<String>,
}

impl ScriptedFetcher {
    pub fn writing(len: usize, title: &str) -> Self {
        Self {
            len,
            title: title.to_string(),
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            len: 0,
            title: String::new(),
            failure: Some(reason.to_string()),
        }
    }
}

#[async_trait]
impl VideoFetcher for ScriptedFetcher {
    async fn fetch(
        &self,
        _url: &str,
        destination: &Path,
        _max_size: u64,
    ) -> video_dl::Result<FetchedVideo> {
        if let Some(reason) = &self.failure {
            return Err(DownloadError::FetchFailed {
                reason: reason.clone(),
            }
            .into());
        }
        tokio::fs::write(destination, vec![7u8; self.len]).await?;
        Ok(FetchedVideo {
            title: self.title.clone(),
        })
    }

    fn capabilities(&self) -> FetcherCapabilities {
        FetcherCapabilities { can_fetch: true }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Config rooted in a fresh temp dir, listening on an ephemeral port
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.download.download_dir = dir.join("downloads");
    config.download.retention = Duration::from_secs(3600);
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    config.server.api.static_dir = dir.join("static");
    config.server.api.index_file = dir.join("index.html");
    config
}

/// A running server and everything that must outlive it
pub struct TestServer {
    pub origin: String,
    pub downloader: Arc<VideoDownloader>,
    pub handle: JoinHandle<()>,
    pub _temp_dir: TempDir,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start the real router on an ephemeral port
pub async fn start_server(
    fetcher: Arc<dyn VideoFetcher>,
    tweak: impl FnOnce(&mut Config),
) -> TestServer {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = test_config(temp_dir.path());
    tweak(&mut config);

    let downloader = Arc::new(VideoDownloader::with_fetcher(config, fetcher).await.unwrap());
    let app = video_dl::api::create_router(downloader.clone(), downloader.config().clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        origin,
        downloader,
        handle,
        _temp_dir: temp_dir,
    }
}

/// Host that remembers links and notifications
pub struct RecordingHost {
    pub origin: String,
    pub links: Mutex<Vec<String>>,
    pub notifications: Mutex<Vec<NotificationKind>>,
}

impl RecordingHost {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            links: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn links(&self) -> Vec<String> {
        self.links.lock().unwrap().clone()
    }

    pub fn last_notification(&self) -> Option<NotificationKind> {
        self.notifications.lock().unwrap().last().copied()
    }
}

impl HostEnvironment for RecordingHost {
    fn expand(&self) {}

    fn ready(&self) {}

    fn theme_params(&self) -> ThemeParams {
        ThemeParams::default()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn impact_occurred(&self, _style: ImpactStyle) {}

    fn notification_occurred(&self, kind: NotificationKind) {
        self.notifications.lock().unwrap().push(kind);
    }

    fn open_link(&self, url: &str) {
        self.links.lock().unwrap().push(url.to_string());
    }
}
