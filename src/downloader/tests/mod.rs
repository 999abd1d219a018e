use super::test_helpers::{
    FakeBehavior, FakeFetcher, create_test_downloader, create_test_downloader_with,
};
use super::*;
use crate::error::ToHttpStatus;
use std::time::Duration;


#[tokio::test]
async fn test_download_success_stores_artifact() {
    let fetcher = Arc::new(FakeFetcher::writing(4096));
    let (downloader, _temp_dir) = create_test_downloader(fetcher.clone()).await;

    let video = downloader
        .download("https://example.com/watch?v=abc")
        .await
        .unwrap();

    assert_eq!(video.title, "Test Clip");
    assert_eq!(video.size, 4096);
    assert_eq!(video.path, video.file_id.artifact_path(downloader.config.download_dir()));
    assert!(video.path.exists());
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(downloader.pending_deletion_count().await, 1);
}

#[tokio::test]
async fn test_each_download_gets_a_fresh_id() {
    let fetcher = Arc::new(FakeFetcher::writing(16));
    let (downloader, _temp_dir) = create_test_downloader(fetcher).await;

    let first = downloader.download("https://example.com/a").await.unwrap();
    let second = downloader.download("https://example.com/a").await.unwrap();

    assert_ne!(first.file_id, second.file_id);
}

#[tokio::test]
async fn test_download_rejects_non_http_urls() {
    let fetcher = Arc::new(FakeFetcher::writing(16));
    let (downloader, _temp_dir) = create_test_downloader(fetcher.clone()).await;

    for url in ["ftp://example.com/v.mp4", "not a url", "file:///etc/passwd", ""] {
        let err = downloader.download(url).await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)), "{url}: {err:?}");
        assert_eq!(err.status_code(), 400);
    }
    assert_eq!(fetcher.calls(), 0, "invalid URLs must not reach the fetcher");
}

#[tokio::test]
async fn test_download_without_output_file_fails() {
    let fetcher = Arc::new(FakeFetcher::new(FakeBehavior::NoOutput));
    let (downloader, _temp_dir) = create_test_downloader(fetcher).await;

    let err = downloader
        .download("https://example.com/missing")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Download(DownloadError::NoOutput { .. })));
    assert_eq!(err.status_code(), 400);
    assert_eq!(downloader.pending_deletion_count().await, 0);
}

#[tokio::test]
async fn test_download_over_limit_is_deleted() {
    let fetcher = Arc::new(FakeFetcher::writing(2048));
    let (downloader, temp_dir) =
        create_test_downloader_with(fetcher, |c| c.download.max_file_size = 1024).await;

    let err = downloader
        .download("https://example.com/huge")
        .await
        .unwrap_err();

    match err {
        Error::Download(DownloadError::TooLarge { size, limit }) => {
            assert_eq!(size, 2048);
            assert_eq!(limit, 1024);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }

    let leftovers = std::fs::read_dir(temp_dir.path().join("downloads"))
        .unwrap()
        .count();
    assert_eq!(leftovers, 0, "oversize artifact must be removed");
}

#[tokio::test]
async fn test_fetch_failure_removes_partial_file() {
    let fetcher = Arc::new(FakeFetcher::new(FakeBehavior::Fail {
        reason: "Video unavailable".into(),
    }));
    let (downloader, temp_dir) = create_test_downloader(fetcher).await;

    let err = downloader
        .download("https://example.com/gone")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Video unavailable"));
    assert_eq!(err.status_code(), 502);
    let leftovers = std::fs::read_dir(temp_dir.path().join("downloads"))
        .unwrap()
        .count();
    assert_eq!(leftovers, 0, ".part file must be removed");
}

#[tokio::test]
async fn test_file_path_resolves_existing_artifact() {
    let fetcher = Arc::new(FakeFetcher::writing(8));
    let (downloader, _temp_dir) = create_test_downloader(fetcher).await;
    let video = downloader.download("https://example.com/v").await.unwrap();

    let path = downloader
        .file_path(&video.file_id.to_string())
        .await
        .unwrap();
    assert_eq!(path, video.path);
}

#[tokio::test]
async fn test_file_path_unknown_and_malformed_ids_are_not_found() {
    let fetcher = Arc::new(FakeFetcher::writing(8));
    let (downloader, _temp_dir) = create_test_downloader(fetcher).await;

    let unknown = FileId::new().to_string();
    for id in [unknown.as_str(), "abc123", "../Cargo.toml", "..%2F..%2Fetc%2Fpasswd"] {
        let err = downloader.file_path(id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "{id}: {err:?}");
        assert_eq!(err.status_code(), 404);
    }
}

#[tokio::test]
async fn test_shutdown_rejects_new_downloads() {
    let fetcher = Arc::new(FakeFetcher::writing(8));
    let (downloader, _temp_dir) = create_test_downloader(fetcher.clone()).await;

    assert!(downloader.is_accepting());
    downloader.shutdown().await.unwrap();
    assert!(!downloader.is_accepting());

    let err = downloader.download("https://example.com/v").await.unwrap_err();
    assert!(matches!(err, Error::ShuttingDown));
    assert_eq!(err.status_code(), 503);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_with_fetcher_rejects_invalid_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = super::test_helpers::test_config(temp_dir.path());
    config.download.max_file_size = 0;

    let result = VideoDownloader::with_fetcher(config, Arc::new(FakeFetcher::writing(1))).await;
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_validate_source_url() {
    assert!(validate_source_url("https://youtu.be/xyz").is_ok());
    assert!(validate_source_url("  HTTP://EXAMPLE.COM/clip  ").is_ok());
    assert!(validate_source_url("mailto:someone@example.com").is_err());
    assert!(validate_source_url("https://").is_err());
}

#[tokio::test]
async fn test_spawn_api_server_method() {
    let fetcher = Arc::new(FakeFetcher::writing(8));
    let (downloader, _temp_dir) = create_test_downloader(fetcher).await;
    let downloader = Arc::new(downloader);

    let api_handle = downloader.spawn_api_server();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished(), "server should still be running");
    api_handle.abort();
}
