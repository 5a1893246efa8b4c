//! Router configuration for the HTTP surface.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{delete_file, download_file, list_files, upload_file, AppState};

/// Create the main router.
///
/// `max_body_bytes` bounds the accepted request body; axum's multipart
/// extractor otherwise caps uploads at its 2 MB default.
pub fn create_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/files", get(list_files))
        .route("/download/:filename", get(download_file))
        .route("/delete/:filename", delete(delete_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
