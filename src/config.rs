//! Configuration types for video-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Download job configuration (storage, limits, retention)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory where artifacts are stored (default: "downloads")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Maximum artifact size in bytes (default: 2 GiB)
    ///
    /// Passed to the fetcher as a hint and enforced again after the download;
    /// larger files are deleted and the job fails.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// How long an artifact stays available after the job finishes (default: 15 minutes)
    #[serde(default = "default_retention", with = "duration_serde")]
    pub retention: Duration,

    /// Delete artifacts with pending deletion timers on shutdown (default: true)
    #[serde(default = "default_true")]
    pub purge_on_shutdown: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            max_file_size: default_max_file_size(),
            retention: default_retention(),
            purge_on_shutdown: true,
        }
    }
}

/// External tool configuration (yt-dlp)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// yt-dlp format selector (default: "best[ext=mp4]/best")
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
            format: default_format(),
        }
    }
}

/// Main configuration for the download service
///
/// Fields are organized into logical sub-configs:
/// - [`download`](DownloadConfig) - storage directory, size limit, retention
/// - [`tools`](ToolsConfig) - external binary paths
/// - [`server`](ServerIntegrationConfig) - HTTP API
///
/// Sub-configs are flattened, so the serialized form has no nesting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Download job settings
    #[serde(flatten)]
    pub download: DownloadConfig,

    /// External tool paths
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// API and external server integration
    #[serde(flatten)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Download directory
    pub fn download_dir(&self) -> &PathBuf {
        &self.download.download_dir
    }

    /// Build a configuration from process environment variables
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// Unset variables keep their defaults.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `HOST`, `PORT` | `server.api.bind_address` |
    /// | `DOWNLOAD_DIR` | `download.download_dir` |
    /// | `MAX_FILE_SIZE` | `download.max_file_size` (bytes) |
    /// | `FILE_RETENTION_SECS` | `download.retention` |
    /// | `YTDLP_PATH` | `tools.ytdlp_path` |
    /// | `YTDLP_FORMAT` | `tools.format` |
    /// | `STATIC_DIR` | `server.api.static_dir` |
    /// | `INDEX_FILE` | `server.api.index_file` |
    /// | `CORS_ORIGINS` | `server.api.cors_origins` (comma-separated) |
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// This is what [`Config::from_env`] uses; tests pass a map instead of
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let api = &mut config.server.api;

        let host = match lookup("HOST") {
            Some(host) => host
                .parse::<std::net::IpAddr>()
                .map_err(|e| invalid("HOST", e))?,
            None => api.bind_address.ip(),
        };
        let port = match lookup("PORT") {
            Some(port) => parse_var::<u16>("PORT", &port)?,
            None => api.bind_address.port(),
        };
        api.bind_address = SocketAddr::new(host, port);

        if let Some(dir) = lookup("STATIC_DIR") {
            api.static_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("INDEX_FILE") {
            api.index_file = PathBuf::from(file);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            api.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(dir) = lookup("DOWNLOAD_DIR") {
            config.download.download_dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup("MAX_FILE_SIZE") {
            config.download.max_file_size = parse_var("MAX_FILE_SIZE", &size)?;
        }
        if let Some(secs) = lookup("FILE_RETENTION_SECS") {
            config.download.retention =
                Duration::from_secs(parse_var("FILE_RETENTION_SECS", &secs)?);
        }

        if let Some(path) = lookup("YTDLP_PATH") {
            config.tools.ytdlp_path = Some(PathBuf::from(path));
        }
        if let Some(format) = lookup("YTDLP_FORMAT") {
            config.tools.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot express as types
    pub fn validate(&self) -> Result<()> {
        if self.download.max_file_size == 0 {
            return Err(Error::Config {
                message: "max_file_size must be greater than zero".into(),
                key: Some("max_file_size".into()),
            });
        }
        if self.tools.format.trim().is_empty() {
            return Err(Error::Config {
                message: "format selector must not be empty".into(),
                key: Some("format".into()),
            });
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| invalid(key, e))
}

fn invalid(key: &str, error: impl std::fmt::Display) -> Error {
    Error::Config {
        message: format!("invalid value for {}: {}", key, error),
        key: Some(key.to_string()),
    }
}

/// External server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: false)
    #[serde(default)]
    pub swagger_ui: bool,

    /// Directory served under /static (default: "static")
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// HTML page served at / (default: "templates/index.html")
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: false,
            static_dir: default_static_dir(),
            index_file: default_index_file(),
        }
    }
}

// Default value functions
fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_max_file_size() -> u64 {
    2 * 1024 * 1024 * 1024 // 2 GiB
}

fn default_retention() -> Duration {
    Duration::from_secs(15 * 60)
}

fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "best[ext=mp4]/best".into()
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_index_file() -> PathBuf {
    PathBuf::from("templates/index.html")
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
