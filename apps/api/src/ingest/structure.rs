//! Turns raw imported resume text into summary, experience and skills.
//!
//! A line-scanning heuristic always runs. The text service then gets one chance to
//! refine it; any failure keeps the heuristic result with `ai = false`.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::normalize::normalize;
use crate::ingest::prompts::{STRUCTURE_PROMPT_TEMPLATE, STRUCTURE_SYSTEM};
use crate::llm_client::{parse_json_object, LlmError, TextCompletion};
use crate::models::SectionKind;

/// Lines before the first recognized heading that are kept as summary.
const PREAMBLE_LINE_LIMIT: usize = 4;
/// Longer imports skip refinement: the service would only see part of the text.
const MAX_PROMPT_CHARS: usize = 20_000;

const BULLET_MARKERS: &[char] = &['-', '•', '*'];
const SKILL_DELIMITERS: &[char] = &[',', ';', '|', '•', '·', '\t'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredImport {
    pub summary: String,
    pub experience: String,
    pub skills: String,
    pub ai: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Preamble,
    Summary,
    Experience,
    Skills,
}

/// Structures `raw_text`, refining the heuristic result through the text service
/// when it answers with usable JSON.
pub async fn structure_import(completion: &dyn TextCompletion, raw_text: &str) -> StructuredImport {
    let mut result = structure_heuristic(raw_text);
    if raw_text.trim().is_empty() {
        return result;
    }
    let length = raw_text.chars().count();
    if length > MAX_PROMPT_CHARS {
        warn!(
            "Import of {length} chars exceeds {MAX_PROMPT_CHARS}; keeping heuristic structure"
        );
        return result;
    }

    match request_structure(completion, raw_text).await {
        Ok(refined) => {
            if let Some(summary) = refined.summary {
                result.summary = summary;
            }
            if let Some(experience) = refined.experience {
                result.experience = experience;
            }
            if let Some(skills) = refined.skills {
                result.skills = skills;
            }
            result.ai = true;
        }
        Err(e) => warn!("Import refinement skipped, keeping heuristic structure: {e}"),
    }

    info!(
        "Structured import: ai={}, experience_lines={}",
        result.ai,
        result.experience.lines().count()
    );
    result
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic pass
// ────────────────────────────────────────────────────────────────────────────

pub fn structure_heuristic(raw_text: &str) -> StructuredImport {
    let mut mode = Mode::Preamble;
    let mut preamble_kept = 0;
    let mut summary: Vec<&str> = Vec::new();
    let mut experience: Vec<String> = Vec::new();
    let mut skills: Vec<&str> = Vec::new();

    for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(next) = heading_mode(line) {
            mode = next;
            continue;
        }
        match mode {
            Mode::Preamble => {
                if preamble_kept < PREAMBLE_LINE_LIMIT {
                    summary.push(line);
                    preamble_kept += 1;
                }
            }
            Mode::Summary => summary.push(line),
            Mode::Experience => push_experience_line(&mut experience, line),
            Mode::Skills => skills.push(line),
        }
    }

    StructuredImport {
        summary: summary.join("\n"),
        experience: experience.join("\n"),
        skills: collapse_skills(&skills),
        ai: false,
    }
}

fn heading_mode(line: &str) -> Option<Mode> {
    let heading = line
        .trim_start_matches('#')
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_lowercase();
    match heading.as_str() {
        "experience" | "work experience" => Some(Mode::Experience),
        "skills" | "technical skills" | "technologies" => Some(Mode::Skills),
        "summary" | "profile" | "about" => Some(Mode::Summary),
        _ => None,
    }
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern is valid"))
}

/// Bullet markers become `"- "`; capitalized lines with a year stay as role headers.
fn push_experience_line(out: &mut Vec<String>, line: &str) {
    if let Some(rest) = line.strip_prefix(BULLET_MARKERS) {
        let rest = rest.trim_start_matches(BULLET_MARKERS).trim();
        if !rest.is_empty() {
            out.push(format!("- {rest}"));
        }
    } else if line.starts_with(|c: char| c.is_uppercase()) && year_pattern().is_match(line) {
        out.push(line.to_string());
    } else {
        out.push(format!("- {line}"));
    }
}

fn collapse_skills(lines: &[&str]) -> String {
    lines
        .iter()
        .flat_map(|line| line.split(SKILL_DELIMITERS))
        .map(|item| {
            item.trim_start_matches(BULLET_MARKERS)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Refinement pass
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RefinedImport {
    summary: Option<String>,
    experience: Option<String>,
    skills: Option<String>,
}

async fn request_structure(
    completion: &dyn TextCompletion,
    raw_text: &str,
) -> Result<RefinedImport, LlmError> {
    let prompt = STRUCTURE_PROMPT_TEMPLATE.replace("{raw_text}", raw_text);
    let raw = completion.complete(&prompt, STRUCTURE_SYSTEM).await?;
    let payload = parse_json_object(&raw)?;

    let field = |kind: SectionKind| -> Option<String> {
        let value = payload.get(kind.as_str()).filter(|v| !v.is_null())?;
        let text = normalize(kind, value);
        (!text.trim().is_empty()).then_some(text)
    };

    let refined = RefinedImport {
        summary: field(SectionKind::Summary),
        experience: field(SectionKind::Experience),
        skills: field(SectionKind::Skills),
    };
    if refined.summary.is_none() && refined.experience.is_none() && refined.skills.is_none() {
        return Err(LlmError::Malformed(
            "response has none of summary, experience, skills".to_string(),
        ));
    }
    Ok(refined)
}
