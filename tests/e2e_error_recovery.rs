//! Error recovery for the documentation loader.
//!
//! Every failure mode must come back as an explicit `LoadError`, leave the
//! cache empty, and let the next `load()` try the source again:
//! - non-2xx responses and timeouts (fetch failures)
//! - malformed bodies (parse failures)
//! - payloads without the record array (schema failures)
//! - bad records under the strict policy

use docs_explorer::loader::{CacheState, DataLoader, LoadError, LoadErrorKind};
use serde_json::json;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

mod util;
use util::{config_for, loader_for, serve_json, serve_once, strict_loader_for};

#[tokio::test]
async fn server_error_then_recovery() {
    let server = MockServer::start().await;
    serve_once(&server, ResponseTemplate::new(503), 1).await;
    serve_json(&server, util::sample_payload(), 1).await;

    let loader = loader_for(&server);
    let err = loader.load().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Fetch);
    assert!(matches!(err, LoadError::Status { status, .. } if status.as_u16() == 503));
    assert_eq!(loader.cache_state(), CacheState::Empty);

    let index = loader.load().await.unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(loader.cache_state(), CacheState::Populated);
}

#[tokio::test]
async fn not_found_is_fetch_error() {
    let server = MockServer::start().await;
    serve_once(&server, ResponseTemplate::new(404), 1).await;

    let err = loader_for(&server).load().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Fetch);
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn slow_source_times_out_as_fetch_error() {
    let server = MockServer::start().await;
    serve_once(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(util::sample_payload())
            .set_delay(Duration::from_secs(3)),
        1,
    )
    .await;

    let loader =
        DataLoader::new(config_for(&server).with_timeout(Duration::from_millis(200))).unwrap();
    let err = loader.load().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Fetch);
    assert!(err.is_timeout(), "expected timeout, got {err}");
    assert!(loader.cached().is_none());
}

#[tokio::test]
async fn malformed_body_then_recovery() {
    let server = MockServer::start().await;
    serve_once(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"),
        1,
    )
    .await;
    serve_json(&server, util::sample_payload(), 1).await;

    let loader = loader_for(&server);
    let err = loader.load().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Parse);
    assert!(loader.cached().is_none());

    assert_eq!(loader.load().await.unwrap().len(), 3);
}

#[tokio::test]
async fn missing_links_field_is_schema_error_and_not_cached() {
    let server = MockServer::start().await;
    serve_once(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"items": []})),
        1,
    )
    .await;
    serve_json(&server, util::sample_payload(), 1).await;

    let loader = loader_for(&server);
    let err = loader.load().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Schema);
    assert_eq!(loader.cache_state(), CacheState::Empty);

    // The next call fetches again instead of replaying the failure.
    assert_eq!(loader.load().await.unwrap().len(), 3);
}

#[tokio::test]
async fn empty_links_is_success_not_failure() {
    let server = MockServer::start().await;
    serve_json(&server, json!({"links": []}), 1).await;

    let loader = loader_for(&server);
    let index = loader.load().await.unwrap();
    assert!(index.is_empty());
    assert_eq!(loader.cache_state(), CacheState::Populated);
}

#[tokio::test]
async fn strict_policy_rejects_whole_payload() {
    let server = MockServer::start().await;
    serve_once(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "links": [
                {"title": "Text", "url": "/text"},
                {"title": "Broken"},
            ]
        })),
        1,
    )
    .await;

    let loader = strict_loader_for(&server);
    let err = loader.load().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::InvalidRecord);
    assert!(matches!(err, LoadError::InvalidRecord { position: 1, .. }));
    assert_eq!(loader.cache_state(), CacheState::Empty);
}

#[tokio::test]
async fn failed_refresh_leaves_cache_empty() {
    let server = MockServer::start().await;
    serve_once(
        &server,
        ResponseTemplate::new(200).set_body_json(util::sample_payload()),
        1,
    )
    .await;
    serve_once(&server, ResponseTemplate::new(500), 1).await;

    let loader = loader_for(&server);
    let held = loader.load().await.unwrap();

    let err = loader.refresh().await.unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Fetch);
    assert_eq!(loader.cache_state(), CacheState::Empty);
    // Callers that already hold the index keep a complete copy.
    assert_eq!(held.len(), 3);
}
