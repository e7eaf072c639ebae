//! Static asset serving
//!
//! Every path that is not an API route is a file under the asset root.
//! `/` serves `index.html`. Request paths are percent-decoded and resolved
//! lexically; anything that would climb out of the root is refused before
//! the filesystem is touched.

use aivr_common::mime::content_type_for;
use aivr_common::paths::safe_asset_path;
use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::AssetError;
use crate::AppState;

/// Answer 405 to anything but GET
pub async fn reject_non_get(request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        debug!(method = %request.method(), path = %request.uri().path(), "Method not allowed");
        return AssetError::MethodNotAllowed.into_response();
    }
    next.run(request).await
}

/// GET /<path> fallback
pub async fn serve_asset(State(state): State<AppState>, uri: Uri) -> Result<Response, AssetError> {
    let file_path = match safe_asset_path(&state.root_folder, uri.path()) {
        Ok(Some(path)) => path,
        Ok(None) => {
            warn!(path = %uri.path(), "Refused path outside asset root");
            return Err(AssetError::Forbidden);
        }
        Err(e) => {
            debug!("Undecodable request path: {}", e);
            return Err(AssetError::BadRequest);
        }
    };

    let metadata = match tokio::fs::metadata(&file_path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AssetError::NotFound),
        Err(e) => return Err(AssetError::Io(e)),
    };
    if !metadata.is_file() {
        return Err(AssetError::NotFound);
    }

    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AssetError::NotFound),
        Err(e) => return Err(AssetError::Io(e)),
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(&file_path))],
        content,
    )
        .into_response())
}
