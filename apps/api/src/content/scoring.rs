//! Resume scoring.
//!
//! `heuristic_score` is pure and offline: it is the fallback whenever the text
//! service is unreachable. `score_resume` layers an optional service opinion on
//! top, trusting it only when the returned score is a number in [0, 100].

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::lexicon::Lexicon;
use crate::content::prompts::{SCORE_PROMPT_TEMPLATE, SCORE_SYSTEM};
use crate::llm_client::{parse_json_object, LlmError, TextCompletion};

const LENGTH_TARGET_CHARS: f64 = 3000.0;
const METRIC_TARGET: f64 = 12.0;
const VERB_TARGET: f64 = 8.0;

const LENGTH_WEIGHT: f64 = 0.4;
const METRIC_WEIGHT: f64 = 0.3;
const VERB_WEIGHT: f64 = 0.3;

const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// 0 – 100
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, f64>>,
    /// Share of target keywords present in the text, 0 – 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_coverage: Option<u8>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// True when the score came from the text service rather than the heuristic.
    #[serde(default)]
    pub ai: bool,
}

/// The three heuristic factors, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicFactors {
    pub length: f64,
    pub numbers: f64,
    pub verbs: f64,
}

impl HeuristicFactors {
    pub fn score(&self) -> u8 {
        let weighted =
            LENGTH_WEIGHT * self.length + METRIC_WEIGHT * self.numbers + VERB_WEIGHT * self.verbs;
        (100.0 * weighted).round().clamp(0.0, 100.0) as u8
    }

    fn breakdown(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("length".to_string(), self.length),
            ("numbers".to_string(), self.numbers),
            ("verbs".to_string(), self.verbs),
        ])
    }
}

fn metric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+%?|\$\d+").expect("metric pattern is valid"))
}

pub fn heuristic_factors(text: &str, lexicon: &Lexicon) -> HeuristicFactors {
    let chars = text.chars().count() as f64;
    let metrics = metric_pattern().find_iter(text).count() as f64;
    let verbs = lexicon.scoring_verbs_found(text) as f64;

    HeuristicFactors {
        length: (chars / LENGTH_TARGET_CHARS).min(1.0),
        numbers: (metrics / METRIC_TARGET).min(1.0),
        verbs: (verbs / VERB_TARGET).min(1.0),
    }
}

/// Deterministic 0 – 100 score using the default lexicon.
pub fn heuristic_score(text: &str) -> u8 {
    heuristic_factors(text, &Lexicon::default()).score()
}

/// Percentage of `keywords` found case-insensitively in `text`.
/// `None` when no non-blank keywords are given.
pub fn keyword_coverage(text: &str, keywords: &[String]) -> Option<u8> {
    let lowered = text.to_lowercase();
    let targets: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if targets.is_empty() {
        return None;
    }
    let found = targets.iter().filter(|k| lowered.contains(k.as_str())).count();
    Some((100.0 * found as f64 / targets.len() as f64).round() as u8)
}

/// Local, deterministic improvement hints.
pub fn local_suggestions(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut suggestions: Vec<String> = text
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            lexicon.weak_starter(line).map(|starter| {
                format!(
                    "Line {} opens with '{}'; lead with an action verb instead.",
                    i + 1,
                    starter
                )
            })
        })
        .collect();

    if !text.trim().is_empty() && metric_pattern().find(text).is_none() {
        suggestions.push(
            "Add measurable outcomes: numbers, percentages, or amounts.".to_string(),
        );
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Heuristic-only result: always available, no I/O.
pub fn heuristic_result(text: &str, lexicon: &Lexicon, keywords: &[String]) -> ScoreResult {
    let factors = heuristic_factors(text, lexicon);
    ScoreResult {
        score: factors.score(),
        breakdown: Some(factors.breakdown()),
        keyword_coverage: keyword_coverage(text, keywords),
        suggestions: local_suggestions(text, lexicon),
        ai: false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service-assisted scoring
// ────────────────────────────────────────────────────────────────────────────

struct ServiceScore {
    score: u8,
    breakdown: BTreeMap<String, f64>,
    suggestions: Vec<String>,
}

/// Heuristic score, replaced by the service's opinion when that opinion is valid.
/// Service failures never surface; they only leave `ai` false.
pub async fn score_resume(
    completion: &dyn TextCompletion,
    lexicon: &Lexicon,
    text: &str,
    keywords: &[String],
) -> ScoreResult {
    let mut result = heuristic_result(text, lexicon, keywords);

    match request_service_score(completion, text).await {
        Ok(service) => {
            debug!(
                "Service score {} accepted (heuristic {})",
                service.score, result.score
            );
            result.score = service.score;
            if !service.breakdown.is_empty() {
                result.breakdown = Some(service.breakdown);
            }
            result.suggestions = merge_suggestions(service.suggestions, result.suggestions);
            result.ai = true;
        }
        Err(e) => warn!("Keeping heuristic score {}: {e}", result.score),
    }

    result
}

async fn request_service_score(
    completion: &dyn TextCompletion,
    text: &str,
) -> Result<ServiceScore, LlmError> {
    let prompt = SCORE_PROMPT_TEMPLATE.replace("{resume_text}", text);
    let raw = completion.complete(&prompt, SCORE_SYSTEM).await?;
    let payload = parse_json_object(&raw)?;

    let score = payload
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| LlmError::Malformed("missing numeric 'score'".to_string()))?;
    if !(0.0..=100.0).contains(&score) {
        return Err(LlmError::OutOfRange(score));
    }

    let breakdown = payload
        .get("breakdown")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect()
        })
        .unwrap_or_default();

    let suggestions = payload
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(ServiceScore {
        score: score.round() as u8,
        breakdown,
        suggestions,
    })
}

fn merge_suggestions(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|s| seen.insert(s.clone()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
