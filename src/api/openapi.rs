//! OpenAPI documentation and schema generation
//!
//! Describes the video-dl HTTP API using utoipa for compile-time spec
//! generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the video-dl HTTP API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "video-dl HTTP API",
        version = "0.1.0",
        description = "Download videos by page URL and fetch the stored files",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Downloads
        crate::api::routes::request_download,
        crate::api::routes::serve_file,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::FileId,
        crate::types::DownloadRequest,
        crate::types::DownloadResponse,
        crate::types::HealthStatus,
    )),
    tags(
        (name = "downloads", description = "Download a video and fetch the stored file"),
        (name = "system", description = "Health check and OpenAPI spec"),
    )
)]
pub struct ApiDoc;
