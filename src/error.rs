//! Error types for video-dl
//!
//! This module provides error handling for both halves of the crate:
//! - Service-side errors (download jobs, artifact lookup, configuration)
//! - HTTP status code mapping for API integration
//! - Client-side errors raised inside the download controller
//!   (validation and transport), which never escape the controller

use crate::types::DownloadResponse;
use thiserror::Error;

/// Result type alias for video-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the download service
///
/// Each variant includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PORT")
        key: Option<String>,
    },

    /// The submitted source URL is not an http(s) URL
    #[error("invalid video URL: {0}")]
    InvalidUrl(String),

    /// The request body is not a JSON object with a `url` string
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Download job error
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact or page not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Shutdown in progress - not accepting new downloads
    #[error("shutdown in progress: not accepting new downloads")]
    ShuttingDown,

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// External tool execution failed (yt-dlp could not be started)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary)
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Download job errors
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The fetcher finished but left no file behind
    #[error("could not download video from {url}")]
    NoOutput {
        /// The source URL that produced nothing
        url: String,
    },

    /// The downloaded file exceeds the configured size limit
    #[error("video is too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Size of the downloaded file in bytes
        size: u64,
        /// Configured maximum size in bytes
        limit: u64,
    },

    /// The fetcher ran and reported a failure
    #[error("fetch failed: {reason}")]
    FetchFailed {
        /// Reason reported by the fetcher (usually the last yt-dlp error line)
        reason: String,
    },
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::InvalidUrl(_) => 400,
            Error::InvalidRequest(_) => 400,
            Error::Download(DownloadError::NoOutput { .. }) => 400,
            Error::Download(DownloadError::TooLarge { .. }) => 400,

            // 404 Not Found
            Error::NotFound(_) => 404,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway - the upstream site or extractor failed
            Error::Download(DownloadError::FetchFailed { .. }) => 502,

            // 503 Service Unavailable
            Error::ShuttingDown => 503,
            Error::ExternalTool(_) => 503,

            // 501 Not Implemented - Feature not supported
            Error::NotSupported(_) => 501,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidUrl(_) => "invalid_url",
            Error::InvalidRequest(_) => "invalid_request",
            Error::Download(e) => match e {
                DownloadError::NoOutput { .. } => "no_output",
                DownloadError::TooLarge { .. } => "too_large",
                DownloadError::FetchFailed { .. } => "fetch_failed",
            },
            Error::Io(_) => "io_error",
            Error::NotFound(_) => "not_found",
            Error::ShuttingDown => "shutting_down",
            Error::ApiServerError(_) => "api_server_error",
            Error::ExternalTool(_) => "external_tool_error",
            Error::NotSupported(_) => "not_supported",
        }
    }
}

impl From<Error> for DownloadResponse {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        DownloadResponse::failure(error.to_string(), Some(code))
    }
}

/// Local input validation failures raised by the download controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input was empty after trimming
    #[error("empty")]
    Empty,

    /// The input does not start with `http://` or `https://`
    #[error("bad-scheme")]
    BadScheme,
}

/// Failure to obtain a parseable response from `/api/download`
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request failed or the body was not the expected JSON
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The configured page origin could not be turned into an endpoint URL
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[from] url::ParseError),

    /// Any other transport failure (used by alternative transports)
    #[error("{0}")]
    Other(String),
}
