use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether the text service is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let mode = if state.config.anthropic_api_key.is_some() {
        "online"
    } else {
        "offline"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "folio-api",
        "mode": mode
    }))
}
