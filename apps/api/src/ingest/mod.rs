// Resume import: file text extraction and heuristic + AI structuring.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod structure;

pub use extract::extract_document_text;
pub use structure::{structure_heuristic, structure_import, StructuredImport};
