//! Download handlers.

use super::{ARTIFACT_CONTENT_TYPE, ARTIFACT_DISPOSITION};
use crate::api::AppState;
use crate::error::Error;
use crate::types::{DownloadRequest, DownloadResponse};
use axum::{
    Json,
    body::Body,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// POST /api/download - Download a video
#[utoipa::path(
    post,
    path = "/api/download",
    tag = "downloads",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Video downloaded and stored", body = DownloadResponse),
        (status = 400, description = "Malformed body, invalid URL, no output or file too large", body = DownloadResponse),
        (status = 502, description = "The extractor failed", body = DownloadResponse),
        (status = 503, description = "Shutting down or extractor unavailable", body = DownloadResponse)
    )
)]
pub async fn request_download(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>, Error> {
    let Json(request) = payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let video = state.downloader.download(&request.url).await?;

    Ok(Json(DownloadResponse::success(&video)))
}

/// GET /api/file/:file_id - Stream a stored artifact
#[utoipa::path(
    get,
    path = "/api/file/{file_id}",
    tag = "downloads",
    params(
        ("file_id" = String, Path, description = "Artifact id returned by /api/download")
    ),
    responses(
        (status = 200, description = "The video file", content_type = "video/mp4"),
        (status = 404, description = "Unknown or expired artifact", body = DownloadResponse)
    )
)]
pub async fn serve_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, Error> {
    let path = state.downloader.file_path(&file_id).await?;

    // The deletion timer may fire between lookup and open
    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(format!("file {}", file_id))
        } else {
            Error::Io(e)
        }
    })?;
    let length = file.metadata().await?.len();

    tracing::debug!(file_id = %file_id, bytes = length, "Serving artifact");

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(ARTIFACT_CONTENT_TYPE)),
        (
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static(ARTIFACT_DISPOSITION),
        ),
        (header::CONTENT_LENGTH, HeaderValue::from(length)),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}
