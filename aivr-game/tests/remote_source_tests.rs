//! Integration tests for the HTTP image providers
//!
//! Each test starts a throwaway axum server on an ephemeral port that plays
//! the part of aivr-server, then drives a RoundController against it.

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use aivr_common::Label;
use aivr_game::remote::parse_base_url;
use aivr_game::round::{LOAD_FAILED_MESSAGE, START_FAILED_MESSAGE};
use aivr_game::{ApiSource, GameError, ImageSource, ManifestSource, RoundController};

/// Test helper: serve `router` on 127.0.0.1 and return its base URL
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn manifest_router(manifest: Value) -> Router {
    Router::new().route(
        "/image-manifest.json",
        get(move || {
            let manifest = manifest.clone();
            async move { Json(manifest) }
        }),
    )
}

fn manifest_source(base: &str) -> ManifestSource {
    ManifestSource::new(reqwest::Client::new(), parse_base_url(base).unwrap()).with_seed(5)
}

fn api_source(base: &str) -> ApiSource {
    ApiSource::new(reqwest::Client::new(), parse_base_url(base).unwrap())
}

// =============================================================================
// Manifest mode
// =============================================================================

#[tokio::test]
async fn test_manifest_mode_selects_encoded_urls() {
    let base = spawn_server(manifest_router(json!({
        "human": ["folder/my file.png"],
        "ai": ["folder/my file.png"]
    })))
    .await;
    let mut source = manifest_source(&base);

    source.prepare().await.unwrap();
    let record = source.select_next().await.unwrap();

    assert_eq!(record.url, format!("{}/folder/my%20file.png", base));
}

#[tokio::test]
async fn test_manifest_mode_labels_match_pools() {
    let base = spawn_server(manifest_router(json!({
        "human": ["h1.png"],
        "ai": ["a1.png", "a2.png"]
    })))
    .await;
    let mut source = manifest_source(&base);
    source.prepare().await.unwrap();

    for _ in 0..50 {
        let record = source.select_next().await.unwrap();
        match record.label {
            Label::Human => assert!(record.url.ends_with("/h1.png")),
            Label::Ai => assert!(record.url.ends_with("/a1.png") || record.url.ends_with("/a2.png")),
        }
    }
}

#[tokio::test]
async fn test_empty_human_pool_fails_startup_visibly() {
    let base = spawn_server(manifest_router(json!({ "human": [], "ai": ["x.png"] }))).await;
    let mut controller = RoundController::new(manifest_source(&base));

    controller.start().await;

    let view = controller.view();
    assert_eq!(view.phase, "failed");
    assert_eq!(view.error.as_deref(), Some(START_FAILED_MESSAGE));
    assert!(!view.controls_enabled);
    assert!(view.image_url.is_none());
    assert_eq!(controller.rounds_loaded(), 0);
}

#[tokio::test]
async fn test_malformed_manifest_fails_prepare() {
    let router = Router::new().route("/image-manifest.json", get(|| async { "not json" }));
    let base = spawn_server(router).await;

    let err = manifest_source(&base).prepare().await.unwrap_err();
    assert!(matches!(err, GameError::Payload(_)));
}

#[tokio::test]
async fn test_missing_manifest_fails_prepare_with_status() {
    let base = spawn_server(Router::new()).await;

    let err = manifest_source(&base).prepare().await.unwrap_err();
    assert!(matches!(err, GameError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_unreachable_server_fails_startup_visibly() {
    // Bind and drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut controller = RoundController::new(manifest_source(&base));
    controller.start().await;

    assert_eq!(controller.view().phase, "failed");
}

// =============================================================================
// API mode
// =============================================================================

#[tokio::test]
async fn test_api_mode_round_trip() {
    let router = Router::new().route(
        "/api/next-image",
        get(|| async { Json(json!({ "imageUrl": "/assets/AiArtData/a%201.png", "source": "ai" })) }),
    );
    let base = spawn_server(router).await;
    let mut controller = RoundController::new(api_source(&base));

    controller.start().await;

    let view = controller.view();
    assert_eq!(view.phase, "awaiting_guess");
    assert_eq!(
        view.image_url.as_deref(),
        Some(format!("{}/assets/AiArtData/a%201.png", base).as_str())
    );
    assert_eq!(controller.phase().current_image().unwrap().label, Label::Ai);
}

#[tokio::test]
async fn test_api_error_status_fails_round() {
    let router = Router::new().route(
        "/api/next-image",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "no pool") }),
    );
    let base = spawn_server(router).await;
    let mut controller = RoundController::new(api_source(&base));

    controller.start().await;

    let view = controller.view();
    assert_eq!(view.phase, "failed");
    assert_eq!(view.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_api_bad_label_is_payload_error() {
    let router = Router::new().route(
        "/api/next-image",
        get(|| async { Json(json!({ "imageUrl": "/x.png", "source": "robot" })) }),
    );
    let base = spawn_server(router).await;

    let err = api_source(&base).select_next().await.unwrap_err();
    assert!(matches!(err, GameError::Payload(_)));
}

#[tokio::test]
async fn test_api_absolute_image_url_ignores_base_sub_path() {
    let router = Router::new().route(
        "/quiz/api/next-image",
        get(|| async { Json(json!({ "imageUrl": "/assets/RealArt/h.png", "source": "human" })) }),
    );
    let base = spawn_server(router).await;
    let mut source = api_source(&format!("{}/quiz", base));

    let record = source.select_next().await.unwrap();

    assert_eq!(record.url, format!("{}/assets/RealArt/h.png", base));
    assert_eq!(record.label, Label::Human);
}
