//! Transport between the controller and `/api/download`

use crate::error::TransportError;
use crate::types::{DownloadRequest, DownloadResponse};
use async_trait::async_trait;
use url::Url;

/// Path of the download endpoint, relative to the page origin
pub const DOWNLOAD_ENDPOINT: &str = "/api/download";

/// Path prefix under which artifacts are served
pub const FILE_ENDPOINT: &str = "/api/file";

/// Issues download requests on behalf of the controller
///
/// An implementation returns `Ok` whenever it obtained a JSON body of the
/// expected shape, whatever its HTTP status. Everything else (connection
/// failures, non-JSON bodies) is a [`TransportError`].
#[async_trait]
pub trait DownloadApi: Send + Sync {
    /// POST `{"url": url}` to the download endpoint
    async fn request_download(&self, url: &str) -> Result<DownloadResponse, TransportError>;
}

/// [`DownloadApi`] over HTTP with reqwest
///
/// No timeout is configured: a request stays pending until the server
/// answers or the connection fails.
#[derive(Debug, Clone)]
pub struct HttpDownloadApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpDownloadApi {
    /// Client for the download endpoint of `origin`
    ///
    /// # Example
    ///
    /// ```
    /// use video_dl::controller::HttpDownloadApi;
    ///
    /// let api = HttpDownloadApi::new("https://videos.example.com").unwrap();
    /// assert_eq!(api.endpoint().as_str(), "https://videos.example.com/api/download");
    /// ```
    pub fn new(origin: &str) -> Result<Self, TransportError> {
        Self::with_client(reqwest::Client::new(), origin)
    }

    /// Same as [`HttpDownloadApi::new`] with a caller-provided client
    pub fn with_client(client: reqwest::Client, origin: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(origin)?.join(DOWNLOAD_ENDPOINT)?;
        Ok(Self { client, endpoint })
    }

    /// Fully-qualified download endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DownloadApi for HttpDownloadApi {
    async fn request_download(&self, url: &str) -> Result<DownloadResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&DownloadRequest {
                url: url.to_string(),
            })
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Download endpoint answered");

        Ok(response.json::<DownloadResponse>().await?)
    }
}

/// Fully-qualified URL of an artifact: `{origin}/api/file/{file_id}`
pub fn artifact_url(origin: &str, file_id: &str) -> String {
    format!(
        "{}{}/{}",
        origin.trim_end_matches('/'),
        FILE_ENDPOINT,
        file_id
    )
}
