//! Maps the requested aggressiveness to a rewrite directive.
//!
//! Conservative passes only tighten wording. Moderate and bold passes are pointed
//! at the configured strong verbs.

use serde::{Deserialize, Serialize};

use crate::content::lexicon::Lexicon;

/// How much an improvement pass may rewrite a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggressiveness {
    Conservative,
    #[default]
    Moderate,
    Bold,
}

/// Prompt directive for the given aggressiveness.
pub fn tone_directive(aggressiveness: Aggressiveness, lexicon: &Lexicon) -> String {
    let verbs = lexicon.strong_verbs.join(", ");
    match aggressiveness {
        Aggressiveness::Conservative => "TONE: conservative. Make minimal edits: fix grammar, \
            tighten wordy phrases and remove filler. Keep sentence structure and bullet order. \
            Do NOT add metrics."
            .to_string(),
        Aggressiveness::Moderate => format!(
            "TONE: moderate. Open bullets with strong action verbs ({verbs}) and add plausible, \
            approximate metrics where the work clearly implies them. Keep bullet order."
        ),
        Aggressiveness::Bold => format!(
            "TONE: bold. Restructure bullets around outcomes, quantify impact wherever possible, \
            and open every bullet with a strong action verb ({verbs}). You may merge or split bullets."
        ),
    }
}
