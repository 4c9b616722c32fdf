//! Improvement orchestrator — previews and applies AI rewrites of the core sections.
//!
//! Flow: build tone-calibrated prompt → call text service (≤ 2 attempts) →
//!       parse & merge over originals → pair experience lines → preview.
//!
//! Service failures never surface as errors: the preview degrades to the original
//! text with `ai = false`. The only hard failure is an unknown section name passed
//! to `apply_selected`. Nothing is kept between calls.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::content::diff::pair_lines;
use crate::content::lexicon::Lexicon;
use crate::content::normalize::normalize;
use crate::errors::AppError;
use crate::improvement::prompts::{IMPROVE_PROMPT_TEMPLATE, IMPROVE_SYSTEM};
use crate::improvement::tone::{tone_directive, Aggressiveness};
use crate::llm_client::prompts::FIDELITY_INSTRUCTION;
use crate::llm_client::{parse_json_object, LlmError, TextCompletion};
use crate::models::{
    ApplyOutcome, BulletRecord, CoreSections, ImprovedSections, ImprovementPreview, SectionChange,
    SectionKind,
};

/// One retry, and only when the service answered with something unusable.
const MAX_ATTEMPTS: u32 = 2;
const MAX_RATIONALE_CHARS: usize = 1000;
const IMPROVABLE_KEYS: [&str; 3] = ["summary", "experience", "skills"];
const DEGRADED_RATIONALE: &str =
    "The improvement service was unavailable; sections are shown unchanged.";

/// Parsed service answer. `None` fields keep the original text.
#[derive(Debug, Default)]
struct ServiceImprovement {
    summary: Option<String>,
    experience: Option<String>,
    skills: Option<String>,
    rationale: Option<String>,
    change_summary: Option<BTreeMap<String, f64>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

/// Builds an improvement preview for the three core sections.
pub async fn generate_preview(
    completion: &dyn TextCompletion,
    lexicon: &Lexicon,
    sections: &CoreSections,
    aggressiveness: Aggressiveness,
) -> ImprovementPreview {
    let prompt = build_improvement_prompt(sections, aggressiveness, lexicon);

    let preview = match request_improvement(completion, &prompt).await {
        Some(service) => ai_preview(sections, service, lexicon),
        None => degraded_preview(sections, lexicon),
    };

    info!(
        "Improvement preview ready: ai={}, tone={:?}, bullets={}",
        preview.ai,
        aggressiveness,
        preview.bullets.len()
    );
    preview
}

async fn request_improvement(
    completion: &dyn TextCompletion,
    prompt: &str,
) -> Option<ServiceImprovement> {
    for attempt in 1..=MAX_ATTEMPTS {
        let parsed = match completion.complete(prompt, IMPROVE_SYSTEM).await {
            Ok(raw) => parse_improvement(&raw),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(service) => return Some(service),
            Err(e) if e.is_transport() => {
                warn!("Improvement service unreachable, returning originals: {e}");
                return None;
            }
            Err(e) => warn!("Improvement attempt {attempt}/{MAX_ATTEMPTS} unusable: {e}"),
        }
    }
    None
}

fn build_improvement_prompt(
    sections: &CoreSections,
    aggressiveness: Aggressiveness,
    lexicon: &Lexicon,
) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{tone_directive}", &tone_directive(aggressiveness, lexicon))
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
        .replace("{summary}", &sections.summary)
        .replace("{experience}", &sections.experience)
        .replace("{skills}", &sections.skills)
}

fn ai_preview(
    sections: &CoreSections,
    service: ServiceImprovement,
    lexicon: &Lexicon,
) -> ImprovementPreview {
    let improved_sections = ImprovedSections {
        summary: merge_change(&sections.summary, service.summary),
        experience: merge_change(&sections.experience, service.experience),
        skills: merge_change(&sections.skills, service.skills),
    };
    let bullets = pair_lines(
        &improved_sections.experience.original,
        &improved_sections.experience.improved,
        lexicon,
    );
    let change_summary = service
        .change_summary
        .or_else(|| Some(derive_change_summary(&bullets)));

    ImprovementPreview {
        improved_sections,
        ai: true,
        rationale: service.rationale,
        change_summary,
        bullets,
    }
}

fn degraded_preview(sections: &CoreSections, lexicon: &Lexicon) -> ImprovementPreview {
    ImprovementPreview {
        improved_sections: ImprovedSections::unchanged(sections),
        ai: false,
        rationale: Some(DEGRADED_RATIONALE.to_string()),
        change_summary: None,
        bullets: pair_lines(&sections.experience, &sections.experience, lexicon),
    }
}

fn merge_change(original: &str, improved: Option<String>) -> SectionChange {
    SectionChange {
        original: original.to_string(),
        improved: improved.unwrap_or_else(|| original.to_string()),
    }
}

fn derive_change_summary(bullets: &[BulletRecord]) -> BTreeMap<String, f64> {
    let count = |pred: fn(&BulletRecord) -> bool| bullets.iter().filter(|b| pred(b)).count() as f64;
    BTreeMap::from([
        ("bulletsChanged".to_string(), count(|b| b.changed)),
        ("metricsAdded".to_string(), count(|b| b.metrics_added)),
        ("verbsAdded".to_string(), count(|b| b.verbs_added)),
    ])
}

// ────────────────────────────────────────────────────────────────────────────
// Response parsing
// ────────────────────────────────────────────────────────────────────────────

fn parse_improvement(raw: &str) -> Result<ServiceImprovement, LlmError> {
    let payload = parse_json_object(raw)?;

    let has_section = IMPROVABLE_KEYS
        .iter()
        .any(|key| payload.contains_key(*key));
    if !has_section {
        return Err(LlmError::Malformed(
            "response has none of summary, experience, skills".to_string(),
        ));
    }

    Ok(ServiceImprovement {
        summary: section_text(&payload, SectionKind::Summary),
        experience: section_text(&payload, SectionKind::Experience),
        skills: payload.get("skills").and_then(skills_text),
        rationale: payload
            .get("rationale")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| r.chars().take(MAX_RATIONALE_CHARS).collect()),
        change_summary: payload
            .get("changeSummary")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                    .collect::<BTreeMap<_, _>>()
            })
            .filter(|map| !map.is_empty()),
    })
}

/// Non-blank canonical text for `kind`, or `None` to keep the original.
fn section_text(payload: &Map<String, Value>, kind: SectionKind) -> Option<String> {
    let text = normalize(kind, payload.get(kind.as_str())?);
    (!text.trim().is_empty()).then_some(text)
}

/// Skills may arrive as a string, a list, or a category → items map.
fn skills_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Array(items) => join_items(items, ", "),
        Value::Object(map) => map
            .iter()
            .map(|(category, items)| match items {
                Value::Array(items) => format!("{category}: {}", join_items(items, ", ")),
                Value::String(s) => format!("{category}: {}", s.trim()),
                other => format!("{category}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => normalize(SectionKind::Skills, other),
    };
    (!text.trim().is_empty()).then_some(text)
}

fn join_items(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        })
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

// ────────────────────────────────────────────────────────────────────────────
// Apply
// ────────────────────────────────────────────────────────────────────────────

/// Stages the requested sections whose improved text differs from `stored`.
///
/// Runs `generate_preview` with the default aggressiveness when no preview is given.
/// The caller persists `patch`; nothing is written here.
pub async fn apply_selected(
    completion: &dyn TextCompletion,
    lexicon: &Lexicon,
    stored: &CoreSections,
    section_names: &[String],
    preview: Option<ImprovementPreview>,
) -> Result<ApplyOutcome, AppError> {
    let requested = section_names
        .iter()
        .map(|name| name.parse::<SectionKind>())
        .collect::<Result<Vec<_>, _>>()?;

    let preview = match preview {
        Some(preview) => preview,
        None => generate_preview(completion, lexicon, stored, Aggressiveness::default()).await,
    };

    let mut patch = BTreeMap::new();
    for kind in requested.into_iter().filter(|k| k.is_improvable()) {
        let (Some(change), Some(current)) = (preview.improved_sections.get(kind), stored.get(kind))
        else {
            continue;
        };
        if change.improved != current && !change.improved.trim().is_empty() {
            patch.insert(kind, change.improved.clone());
        }
    }

    let mut sections = stored.clone();
    for (kind, value) in &patch {
        sections.set(*kind, value.clone());
    }

    if patch.is_empty() {
        info!("Apply requested for {section_names:?}: nothing differs, no-op");
    } else {
        info!(
            "Staged {} section(s) for persistence: {:?}",
            patch.len(),
            patch.keys().collect::<Vec<_>>()
        );
    }

    Ok(ApplyOutcome {
        improved: !patch.is_empty(),
        patch,
        sections,
    })
}
