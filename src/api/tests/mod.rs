use super::*;
use crate::downloader::test_helpers::{FakeBehavior, FakeFetcher};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Helper to create a test VideoDownloader wrapped in Arc
async fn create_test_downloader(
    fetcher: Arc<FakeFetcher>,
) -> (Arc<VideoDownloader>, tempfile::TempDir) {
    let (downloader, temp_dir) =
        crate::downloader::test_helpers::create_test_downloader(fetcher).await;
    (Arc::new(downloader), temp_dir)
}

/// Router over a downloader whose fetcher writes `len` bytes
async fn test_router(len: usize) -> (Router, Arc<VideoDownloader>, tempfile::TempDir) {
    let (downloader, temp_dir) = create_test_downloader(Arc::new(FakeFetcher::writing(len))).await;
    let app = create_router(downloader.clone(), downloader.config().clone());
    (app, downloader, temp_dir)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let (downloader, _temp_dir) = create_test_downloader(Arc::new(FakeFetcher::writing(1))).await;
    let config = downloader.config().clone();

    let api_handle = tokio::spawn({
        let downloader = downloader.clone();
        async move { start_api_server(downloader, config).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished());
    api_handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    let (downloader, _temp_dir) = create_test_downloader(Arc::new(FakeFetcher::writing(1))).await;

    let mut config = (**downloader.config()).clone();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = vec!["*".to_string()];
    let app = create_router(downloader, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let (downloader, _temp_dir) = create_test_downloader(Arc::new(FakeFetcher::writing(1))).await;

    let mut config = (**downloader.config()).clone();
    config.server.api.cors_origins = vec![
        "bad\norigin".to_string(),
        "https://web.telegram.org".to_string(),
    ];
    let app = create_router(downloader, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "https://web.telegram.org")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://web.telegram.org"
    );

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_cors_disabled() {
    let (downloader, _temp_dir) = create_test_downloader(Arc::new(FakeFetcher::writing(1))).await;

    let mut config = (**downloader.config()).clone();
    config.server.api.cors_enabled = false;
    let app = create_router(downloader, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let (downloader, _temp_dir) = create_test_downloader(Arc::new(FakeFetcher::writing(1))).await;

    let app = create_router(downloader.clone(), downloader.config().clone());
    let response = app.oneshot(get_request("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut config = (**downloader.config()).clone();
    config.server.api.swagger_ui = true;
    let app = create_router(downloader, Arc::new(config));
    let response = app.oneshot(get_request("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_build_cors_layer_skips_invalid_origins() {
    // Must not panic on header values that cannot be parsed
    let _layer = build_cors_layer(&["https://ok.example".into(), "bad\norigin".into()]);
    let _any = build_cors_layer(&[]);
}
