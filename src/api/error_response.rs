//! HTTP error response handling for the API
//!
//! Errors render as the same JSON shape `/api/download` uses for success,
//! with `success: false`, so the page controller can parse every answer.

use crate::error::{Error, ToHttpStatus};
use crate::types::DownloadResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            tracing::error!(error = %self, status = status_code.as_u16(), "Request failed");
        }

        let body: DownloadResponse = self.into();

        (status_code, Json(body)).into_response()
    }
}
