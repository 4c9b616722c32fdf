// Improvement pipeline: tone calibration, AI-backed preview, selective apply.
// All text-service calls go through llm_client::TextCompletion.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod tone;

pub use orchestrator::{apply_selected, generate_preview};
pub use tone::Aggressiveness;
