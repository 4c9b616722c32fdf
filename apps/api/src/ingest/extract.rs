//! Plain-text extraction from uploaded resume files.
//!
//! PDF parsing is CPU-bound; callers on the async runtime run
//! `extract_document_text` inside `tokio::task::spawn_blocking`.

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Returns the text content of an uploaded file.
///
/// PDFs (by extension or magic bytes) go through `pdf-extract`; anything else is
/// decoded as UTF-8, replacing invalid sequences.
pub fn extract_document_text(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let text = if is_pdf(file_name, bytes) {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Upload(format!("could not read PDF '{file_name}': {e}")))?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "'{file_name}' contains no extractable text"
        )));
    }
    Ok(text)
}

fn is_pdf(file_name: &str, bytes: &[u8]) -> bool {
    file_name.to_lowercase().ends_with(".pdf") || bytes.starts_with(PDF_MAGIC)
}
