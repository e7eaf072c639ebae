//! Integration tests for the JSON endpoints
//!
//! Tests cover:
//! - GET /api/next-image with a pool (labels, encoded URLs, both labels seen)
//! - 503 JSON error when the server runs without a pool
//! - 405 for non-GET on API routes
//! - GET /health

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

use aivr_common::ImagePool;
use aivr_server::{build_router, AppState};

fn setup_app_with_pool() -> axum::Router {
    let pool = ImagePool::new(
        vec!["assets/RealArt/my photo.jpg".to_string()],
        vec![
            "assets/AiArtData/a1.png".to_string(),
            "assets/AiArtData/a2.png".to_string(),
        ],
    )
    .expect("Pool should be valid");
    build_router(AppState::new("public".into()).with_pool(pool))
}

/// Test helper: Create request
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// /api/next-image
// =============================================================================

#[tokio::test]
async fn test_next_image_returns_labelled_encoded_url() {
    let app = setup_app_with_pool();
    let mut seen_human = false;
    let mut seen_ai = false;

    for _ in 0..100 {
        let response = app
            .clone()
            .oneshot(test_request("GET", "/api/next-image"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = extract_json(response.into_body()).await;
        let url = body["imageUrl"].as_str().expect("imageUrl should be a string");
        match body["source"].as_str() {
            Some("human") => {
                seen_human = true;
                assert_eq!(url, "/assets/RealArt/my%20photo.jpg");
            }
            Some("ai") => {
                seen_ai = true;
                assert!(
                    url == "/assets/AiArtData/a1.png" || url == "/assets/AiArtData/a2.png",
                    "unexpected ai url {}",
                    url
                );
            }
            other => panic!("unexpected source {:?}", other),
        }
    }

    // 100 fair coin flips all landing the same way is vanishingly unlikely
    assert!(seen_human && seen_ai);
}

#[tokio::test]
async fn test_next_image_without_pool_is_503() {
    let app = build_router(AppState::new("public".into()));

    let response = app
        .oneshot(test_request("GET", "/api/next-image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UNAVAILABLE");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_next_image_post_is_405() {
    let app = setup_app_with_pool();

    let response = app
        .oneshot(test_request("POST", "/api/next-image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// /health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(AppState::new("public".into()));

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "aivr-server");
    assert!(body["version"].is_string());
}
