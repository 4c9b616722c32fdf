//! Folio content pipeline: normalization, word diffs, scoring, merge,
//! AI-backed improvement previews and resume import structuring.

pub mod config;
pub mod content;
pub mod errors;
pub mod improvement;
pub mod ingest;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;
