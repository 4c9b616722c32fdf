// Pure content leaves: normalization, word diff, scoring, merge.
// Everything here except `scoring::score_resume` is synchronous and side-effect free.

pub mod diff;
pub mod handlers;
pub mod lexicon;
pub mod merge;
pub mod normalize;
pub mod prompts;
pub mod scoring;

pub use diff::{diff_stats, diff_tokens, DiffOp, DiffStats};
pub use lexicon::Lexicon;
pub use merge::smart_merge;
pub use normalize::{normalize, normalize_field};
pub use scoring::{heuristic_score, score_resume, ScoreResult};
