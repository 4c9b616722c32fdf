//! Axum route handlers for the Import API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::ingest::extract::extract_document_text;
use crate::ingest::structure::{structure_import, StructuredImport};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRequest {
    pub raw_text: String,
}

/// POST /api/v1/import/structure
pub async fn handle_structure(
    State(state): State<AppState>,
    Json(req): Json<StructureRequest>,
) -> Result<Json<StructuredImport>, AppError> {
    if req.raw_text.trim().is_empty() {
        return Err(AppError::Validation("rawText must not be empty".to_string()));
    }
    Ok(Json(
        structure_import(state.completion.as_ref(), &req.raw_text).await,
    ))
}

/// POST /api/v1/import/upload (multipart, field `file`)
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StructuredImport>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(format!("could not read '{file_name}': {e}")))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Upload(format!("missing '{FILE_FIELD}' field")))?;
    info!("Import upload: {file_name} ({} bytes)", bytes.len());

    let name = file_name.clone();
    let text = tokio::task::spawn_blocking(move || extract_document_text(&name, &bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "spawn_blocking failed extracting '{file_name}': {e}"
            ))
        })??;

    Ok(Json(structure_import(state.completion.as_ref(), &text).await))
}
