//! Axum route handlers for the Improvement API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::improvement::orchestrator::{apply_selected, generate_preview};
use crate::improvement::tone::Aggressiveness;
use crate::models::{ApplyOutcome, CoreSections, ImprovementPreview};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub sections: CoreSections,
    #[serde(default)]
    pub aggressiveness: Aggressiveness,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    /// Currently stored values, as read by the caller.
    pub sections: CoreSections,
    pub section_names: Vec<String>,
    #[serde(default)]
    pub preview: Option<ImprovementPreview>,
}

/// POST /api/v1/improve/preview
///
/// Always succeeds for well-formed input; `ai: false` marks a degraded preview.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<ImprovementPreview>, AppError> {
    let preview = generate_preview(
        state.completion.as_ref(),
        &state.lexicon,
        &request.sections,
        request.aggressiveness,
    )
    .await;
    Ok(Json(preview))
}

/// POST /api/v1/improve/apply
///
/// Returns the staged patch for the caller to persist. Unknown section names → 400.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<ApplyOutcome>, AppError> {
    let outcome = apply_selected(
        state.completion.as_ref(),
        &state.lexicon,
        &request.sections,
        &request.section_names,
        request.preview,
    )
    .await?;
    Ok(Json(outcome))
}
