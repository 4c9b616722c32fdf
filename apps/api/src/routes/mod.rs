pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::content::handlers as content;
use crate::improvement::handlers as improvement;
use crate::ingest::handlers as ingest;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Content tools
        .route("/api/v1/normalize", post(content::handle_normalize))
        .route("/api/v1/diff", post(content::handle_diff))
        .route("/api/v1/score", post(content::handle_score))
        .route("/api/v1/merge", post(content::handle_merge))
        // Improvement
        .route("/api/v1/improve/preview", post(improvement::handle_preview))
        .route("/api/v1/improve/apply", post(improvement::handle_apply))
        // Import
        .route("/api/v1/import/structure", post(ingest::handle_structure))
        .route(
            "/api/v1/import/upload",
            post(ingest::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
