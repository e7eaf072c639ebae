//! aivr-server library - AI vs Real quiz server
//!
//! Serves the browser front end and image assets from one asset root, and
//! optionally `GET /api/next-image` for clients that let the server pick.

use std::path::PathBuf;
use std::sync::Arc;

use aivr_common::ImagePool;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod pool;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory every static request resolves under
    pub root_folder: Arc<PathBuf>,
    /// Pool for `/api/next-image`; `None` when the endpoint is disabled
    pub pool: Option<Arc<ImagePool>>,
}

impl AppState {
    /// Static assets only
    pub fn new(root_folder: PathBuf) -> Self {
        Self {
            root_folder: Arc::new(root_folder),
            pool: None,
        }
    }

    /// Enable server-side selection
    pub fn with_pool(mut self, pool: ImagePool) -> Self {
        self.pool = Some(Arc::new(pool));
        self
    }
}

/// Build application router
///
/// Every method other than GET is answered with 405 before routing, for
/// API and static paths alike. The method check sits outside the CORS layer
/// so preflight `OPTIONS` requests get 405 too.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    Router::new()
        .route("/api/next-image", get(api::next_image))
        .merge(api::health_routes())
        .fallback(api::serve_asset)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(api::reject_non_get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
