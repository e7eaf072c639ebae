//! Server-side image selection
//!
//! Same rule as the clients: label first (50/50), then an image of that
//! label.

use aivr_common::paths::encode_path;
use aivr_common::NextImageResponse;
use axum::{extract::State, Json};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/next-image
///
/// Returns `{ imageUrl, source }`; 503 when the server runs without a pool.
pub async fn next_image(State(state): State<AppState>) -> ApiResult<Json<NextImageResponse>> {
    let pool = state.pool.as_deref().ok_or_else(|| {
        ApiError::Unavailable("image selection is not enabled on this server".to_string())
    })?;

    let record = pool.select(&mut rand::thread_rng());
    debug!(label = %record.label, path = %record.url, "Selected next image");

    Ok(Json(NextImageResponse {
        image_url: format!("/{}", encode_path(&record.url)),
        source: record.label,
    }))
}
