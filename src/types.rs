//! Core types for video-dl

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use utoipa::ToSchema;
use uuid::Uuid;

/// File extension used for every stored artifact
pub const ARTIFACT_EXTENSION: &str = "mp4";

/// Unique identifier for a downloaded artifact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FileId(pub Uuid);

impl FileId {
    /// Create a new random FileId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Location of this artifact inside `dir`
    pub fn artifact_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.0, ARTIFACT_EXTENSION))
    }

    /// Recover the id from an artifact file name (`<uuid>.mp4`)
    pub fn from_artifact_path(path: &Path) -> Option<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXTENSION) {
            return None;
        }
        path.file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse().ok())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Request body for `POST /api/download`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DownloadRequest {
    /// Source page URL of the video
    pub url: String,
}

/// Response body for `POST /api/download`
///
/// On success `file_id`, `title` and `size` are present. On failure only
/// `error` (and, from this server, `code`) is set. Every field is optional on
/// the wire so that any JSON object parses; a missing `success` means failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DownloadResponse {
    /// Whether the download succeeded
    #[serde(default)]
    pub success: bool,

    /// Identifier of the stored artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,

    /// Video title reported by the extractor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Artifact size in bytes
    ///
    /// Any JSON number is accepted, so `10485760.0` reads the same as `10485760`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Machine-readable error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DownloadResponse {
    /// Successful response for a stored artifact
    pub fn success(video: &DownloadedVideo) -> Self {
        Self {
            success: true,
            file_id: Some(video.file_id.to_string()),
            title: Some(video.title.clone()),
            size: Some(video.size as f64),
            error: None,
            code: None,
        }
    }

    /// Failure response with a message and optional error code
    pub fn failure(message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            code,
            ..Default::default()
        }
    }
}

/// A finished download job
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedVideo {
    /// Artifact identifier
    pub file_id: FileId,
    /// Video title
    pub title: String,
    /// Size in bytes
    pub size: u64,
    /// Where the artifact is stored
    pub path: PathBuf,
}

/// Response body for `GET /health`
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always "ok" when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Name of the active fetcher implementation
    pub fetcher: String,
    /// Whether new download jobs are accepted
    pub accepting: bool,
}
