//! Word lists consulted by the scorer, the line classifier and the improvement prompts.
//!
//! Defaults are compiled in; `Config` can replace any list from the environment.

use serde::{Deserialize, Serialize};

/// Opening verbs that mark a bullet as action-led.
const DEFAULT_STRONG_VERBS: &[&str] = &[
    "Led",
    "Built",
    "Created",
    "Optimized",
    "Designed",
    "Improved",
    "Reduced",
    "Increased",
    "Implemented",
    "Delivered",
];

/// Verbs counted by the heuristic scorer (matched case-insensitively anywhere in the text).
const DEFAULT_SCORING_VERBS: &[&str] = &[
    "led",
    "built",
    "created",
    "optimized",
    "designed",
    "improved",
    "reduced",
    "increased",
];

/// Passive openers that usually hide the actual contribution.
const DEFAULT_WEAK_STARTERS: &[&str] = &[
    "responsible for",
    "worked on",
    "helped",
    "assisted",
    "participated in",
    "involved in",
    "tasked with",
    "duties included",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub strong_verbs: Vec<String>,
    pub scoring_verbs: Vec<String>,
    pub weak_starters: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            strong_verbs: to_owned(DEFAULT_STRONG_VERBS),
            scoring_verbs: to_owned(DEFAULT_SCORING_VERBS),
            weak_starters: to_owned(DEFAULT_WEAK_STARTERS),
        }
    }
}

impl Lexicon {
    /// True if `word` is one of the strong verbs. Surrounding punctuation is ignored,
    /// case is not: "Led" counts, "led" does not.
    pub fn is_strong_verb(&self, word: &str) -> bool {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        !word.is_empty() && self.strong_verbs.iter().any(|v| v == word)
    }

    /// Returns the weak starter that opens `line`, if any.
    pub fn weak_starter<'a>(&'a self, line: &str) -> Option<&'a str> {
        let lowered = line
            .trim_start_matches(|c: char| c == '-' || c == '•' || c == '*' || c.is_whitespace())
            .to_lowercase();
        self.weak_starters
            .iter()
            .find(|w| lowered.starts_with(w.as_str()))
            .map(String::as_str)
    }

    /// Number of distinct scoring verbs present in `text`, case-insensitive.
    pub fn scoring_verbs_found(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        self.scoring_verbs
            .iter()
            .filter(|v| lowered.contains(&v.to_lowercase()))
            .count()
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
