use anyhow::{Context, Result};

use crate::content::lexicon::Lexicon;

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset → the pipeline runs offline with heuristic fallbacks only.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub strong_verbs: Option<Vec<String>>,
    pub scoring_verbs: Option<Vec<String>>,
    pub weak_starters: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            strong_verbs: optional_env("STRONG_VERBS").map(|v| parse_list(&v)),
            scoring_verbs: optional_env("SCORING_VERBS").map(|v| parse_list(&v)),
            weak_starters: optional_env("WEAK_STARTERS").map(|v| parse_list(&v)),
        })
    }

    /// Built-in word lists with any configured overrides applied.
    /// An override that parses to an empty list is ignored.
    pub fn lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::default();
        if let Some(verbs) = self.strong_verbs.clone().filter(|v| !v.is_empty()) {
            lexicon.strong_verbs = verbs;
        }
        if let Some(verbs) = self.scoring_verbs.clone().filter(|v| !v.is_empty()) {
            lexicon.scoring_verbs = verbs.into_iter().map(|v| v.to_lowercase()).collect();
        }
        if let Some(starters) = self.weak_starters.clone().filter(|v| !v.is_empty()) {
            lexicon.weak_starters = starters.into_iter().map(|s| s.to_lowercase()).collect();
        }
        lexicon
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            llm_timeout_secs: 60,
            max_upload_bytes: 10 * 1024 * 1024,
            strong_verbs: None,
            scoring_verbs: None,
            weak_starters: None,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" Led, Shipped ,, Scaled "),
            vec!["Led", "Shipped", "Scaled"]
        );
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_default_lexicon_without_overrides() {
        assert_eq!(Config::default().lexicon(), Lexicon::default());
    }

    #[test]
    fn test_lexicon_overrides() {
        let config = Config {
            strong_verbs: Some(vec!["Shipped".to_string()]),
            scoring_verbs: Some(vec!["Shipped".to_string()]),
            weak_starters: Some(vec![]),
            ..Config::default()
        };
        let lexicon = config.lexicon();
        assert_eq!(lexicon.strong_verbs, vec!["Shipped"]);
        assert_eq!(lexicon.scoring_verbs, vec!["shipped"]);
        assert_eq!(lexicon.weak_starters, Lexicon::default().weak_starters);
    }
}
