//! Axum route handlers for the stateless content tools.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::diff::{
    diff_cells, diff_stats, diff_tokens, DiffOp, DiffStats, MAX_DIFF_CELLS,
};
use crate::content::merge::smart_merge;
use crate::content::normalize::normalize_field;
use crate::content::scoring::{heuristic_result, score_resume, ScoreResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    /// Section name, e.g. `"experience"` or `"metaKeywords"`.
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub ops: Vec<DiffOp>,
    pub stats: DiffStats,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Ask the text service for a second opinion.
    #[serde(default)]
    pub enhanced: bool,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    pub existing: String,
    pub addition: String,
}

/// POST /api/v1/normalize
pub async fn handle_normalize(
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<TextResponse>, AppError> {
    Ok(Json(TextResponse {
        text: normalize_field(&req.kind, &req.value)?,
    }))
}

/// POST /api/v1/diff
///
/// Pairs too large for a word-level diff are rejected rather than degraded.
pub async fn handle_diff(Json(req): Json<DiffRequest>) -> Result<Json<DiffResponse>, AppError> {
    let cells = diff_cells(&req.a, &req.b);
    if cells > MAX_DIFF_CELLS {
        return Err(AppError::Validation(format!(
            "texts too large to diff ({cells} cells, limit {MAX_DIFF_CELLS})"
        )));
    }
    let ops = diff_tokens(&req.a, &req.b);
    let stats = diff_stats(&ops);
    Ok(Json(DiffResponse { ops, stats }))
}

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Json<ScoreResult> {
    let result = if req.enhanced {
        score_resume(
            state.completion.as_ref(),
            &state.lexicon,
            &req.text,
            &req.keywords,
        )
        .await
    } else {
        heuristic_result(&req.text, &state.lexicon, &req.keywords)
    };
    Json(result)
}

/// POST /api/v1/merge
pub async fn handle_merge(Json(req): Json<MergeRequest>) -> Json<TextResponse> {
    Json(TextResponse {
        text: smart_merge(&req.existing, &req.addition),
    })
}
