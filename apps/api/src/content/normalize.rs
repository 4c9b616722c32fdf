//! Field normalizer — flattens raw fragments (imports, AI output, suggestion merges)
//! into the canonical single-string form of a section.
//!
//! Total over every `(SectionKind, serde_json::Value)` pair: never panics, always
//! returns a `String`, and never drops data silently (unrecognized shapes fall back
//! to JSON text).

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::SectionKind;

const TITLE_KEYS: &[&str] = &["title", "role", "position"];
const ORG_KEYS: &[&str] = &["company", "organization", "org"];
const PERIOD_KEYS: &[&str] = &["period", "dates", "year"];

const DEGREE_KEYS: &[&str] = &["degree", "qualification"];
const SCHOOL_KEYS: &[&str] = &["school", "institution"];
const GRADUATION_KEYS: &[&str] = &["year", "graduationYear", "dates"];

const QUOTE_KEYS: &[&str] = &["quote", "text", "content"];
const AUTHOR_KEYS: &[&str] = &["author", "name"];
const AUTHOR_TITLE_KEYS: &[&str] = &["title", "role"];

const CONTACT_FIELDS: &[(&str, &str)] = &[
    ("email", "Email"),
    ("phone", "Phone"),
    ("location", "Location"),
    ("website", "Website"),
];

/// Name-keyed entry point: resolves `kind` first, so an unknown section name is the
/// only way normalization can fail.
pub fn normalize_field(kind: &str, value: &Value) -> Result<String, AppError> {
    let kind: SectionKind = kind.parse()?;
    Ok(normalize(kind, value))
}

/// Converts a raw value into the canonical text of `kind`.
pub fn normalize(kind: SectionKind, value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => normalize_array(kind, items),
        Value::Object(map) => normalize_object(kind, map, value),
    }
}

fn normalize_array(kind: SectionKind, items: &[Value]) -> String {
    match kind {
        SectionKind::Experience | SectionKind::Projects | SectionKind::Achievements => items
            .iter()
            .map(timeline_entry)
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        SectionKind::Education => items
            .iter()
            .map(education_entry)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        SectionKind::Skills | SectionKind::MetaKeywords => keyword_list(items).join(", "),
        SectionKind::Testimonials => items
            .iter()
            .map(testimonial)
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        SectionKind::Services => items
            .iter()
            .map(|item| plain(item).trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        SectionKind::Summary
        | SectionKind::Certifications
        | SectionKind::Languages
        | SectionKind::Publications
        | SectionKind::VolunteerWork
        | SectionKind::Interests
        | SectionKind::References
        | SectionKind::Contact
        | SectionKind::About => items
            .iter()
            .map(|item| format!("- {}", plain(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn normalize_object(kind: SectionKind, map: &Map<String, Value>, raw: &Value) -> String {
    match kind {
        SectionKind::Skills => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", inline_list(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        SectionKind::Contact => {
            let parts: Vec<String> = CONTACT_FIELDS
                .iter()
                .filter_map(|(key, label)| {
                    pick(map, &[*key]).map(|value| format!("{label}: {value}"))
                })
                .collect();
            if parts.is_empty() {
                pretty(raw)
            } else {
                parts.join(" | ")
            }
        }
        SectionKind::Summary
        | SectionKind::Experience
        | SectionKind::Projects
        | SectionKind::Education
        | SectionKind::Certifications
        | SectionKind::Achievements
        | SectionKind::Languages
        | SectionKind::Publications
        | SectionKind::VolunteerWork
        | SectionKind::Interests
        | SectionKind::References
        | SectionKind::Testimonials
        | SectionKind::Services
        | SectionKind::About
        | SectionKind::MetaKeywords => pretty(raw),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Element composers
// ────────────────────────────────────────────────────────────────────────────

/// `"<title> @ <org> (<period>)"` followed by `"  • "` bullet lines.
fn timeline_entry(item: &Value) -> String {
    let Some(obj) = item.as_object() else {
        return plain(item);
    };

    let mut lines = Vec::new();
    let header = timeline_header(obj);
    if !header.is_empty() {
        lines.push(header);
    }

    match obj.get("bullets") {
        Some(Value::Array(bullets)) => lines.extend(
            bullets
                .iter()
                .map(|b| plain(b).trim().to_string())
                .filter(|b| !b.is_empty())
                .map(|b| format!("  • {b}")),
        ),
        _ => {
            if let Some(description) = pick(obj, &["description", "summary"]) {
                lines.push(format!("  • {description}"));
            }
        }
    }

    if lines.is_empty() {
        return item.to_string();
    }
    lines.join("\n")
}

fn timeline_header(obj: &Map<String, Value>) -> String {
    let mut header = pick(obj, TITLE_KEYS).unwrap_or_default();
    if let Some(org) = pick(obj, ORG_KEYS) {
        if !header.is_empty() {
            header.push_str(" @ ");
        }
        header.push_str(&org);
    }
    if let Some(period) = pick(obj, PERIOD_KEYS) {
        if !header.is_empty() {
            header.push(' ');
        }
        header.push_str(&format!("({period})"));
    }
    header
}

fn education_entry(item: &Value) -> String {
    let Some(obj) = item.as_object() else {
        return plain(item);
    };
    let parts: Vec<String> = [DEGREE_KEYS, SCHOOL_KEYS, GRADUATION_KEYS]
        .iter()
        .filter_map(|keys| pick(obj, keys))
        .collect();
    if parts.is_empty() {
        item.to_string()
    } else {
        parts.join(" | ")
    }
}

fn testimonial(item: &Value) -> String {
    let Some(obj) = item.as_object() else {
        return plain(item);
    };
    let quote = pick(obj, QUOTE_KEYS);
    let attribution = [pick(obj, AUTHOR_KEYS), pick(obj, AUTHOR_TITLE_KEYS)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    match (quote, attribution.is_empty()) {
        (Some(q), false) => format!("“{q}” — {attribution}"),
        (Some(q), true) => format!("“{q}”"),
        (None, false) => format!("— {attribution}"),
        (None, true) => item.to_string(),
    }
}

/// Flattens nested arrays to trimmed, non-empty, first-seen-unique strings.
fn keyword_list(items: &[Value]) -> Vec<String> {
    let mut flat = Vec::new();
    flatten_into(items, &mut flat);

    let mut seen = HashSet::new();
    flat.into_iter()
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

fn flatten_into(items: &[Value], out: &mut Vec<String>) {
    for item in items {
        match item {
            Value::Array(inner) => flatten_into(inner, out),
            other => out.push(plain(other).trim().to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Value helpers
// ────────────────────────────────────────────────────────────────────────────

/// First alias key holding a non-blank string, or a number/bool rendered as text.
fn pick(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Strings verbatim, null as empty, everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn inline_list(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| plain(item).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => plain(other),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_field_by_name() {
        let value = json!([{"degree": "BSc CS", "school": "MIT", "year": "2020"}]);
        assert_eq!(
            normalize_field("education", &value).unwrap(),
            "BSc CS | MIT | 2020"
        );
        assert!(matches!(
            normalize_field("hobbies", &value),
            Err(AppError::InputShapeUnsupported(_))
        ));
    }

    #[test]
    fn test_null_is_empty_and_string_is_unchanged() {
        assert_eq!(normalize(SectionKind::Summary, &Value::Null), "");
        assert_eq!(
            normalize(SectionKind::Experience, &json!("  keep me  ")),
            "  keep me  "
        );
    }

    #[test]
    fn test_scalars_are_stringified() {
        assert_eq!(normalize(SectionKind::Languages, &json!(3)), "3");
        assert_eq!(normalize(SectionKind::Interests, &json!(true)), "true");
    }

    #[test]
    fn test_experience_object_header_and_bullets() {
        let value = json!([{
            "title": "Engineer",
            "company": "Acme",
            "period": "2019-2021",
            "bullets": ["Shipped billing", "Cut costs 20%"]
        }]);
        assert_eq!(
            normalize(SectionKind::Experience, &value),
            "Engineer @ Acme (2019-2021)\n  • Shipped billing\n  • Cut costs 20%"
        );
    }

    #[test]
    fn test_experience_aliases_and_missing_parts() {
        let value = json!([
            {"role": "Lead", "dates": "2022", "description": "Ran the team"},
            {"organization": "Globex"},
            "Freelance work"
        ]);
        assert_eq!(
            normalize(SectionKind::Experience, &value),
            "Lead (2022)\n  • Ran the team\nGlobex\nFreelance work"
        );
    }

    #[test]
    fn test_projects_object_without_known_keys_falls_back_to_json() {
        let value = json!([{"repo": "folio"}]);
        assert_eq!(
            normalize(SectionKind::Projects, &value),
            r#"{"repo":"folio"}"#
        );
    }

    #[test]
    fn test_education_array_example() {
        let value = json!([{"degree": "BSc CS", "school": "MIT", "year": "2020"}]);
        assert_eq!(
            normalize(SectionKind::Education, &value),
            "BSc CS | MIT | 2020"
        );
    }

    #[test]
    fn test_education_numeric_year_and_partial_parts() {
        let value = json!([
            {"qualification": "MSc", "graduationYear": 2023},
            "Bootcamp"
        ]);
        assert_eq!(
            normalize(SectionKind::Education, &value),
            "MSc | 2023\nBootcamp"
        );
    }

    #[test]
    fn test_education_unrecognized_object_is_serialized() {
        let value = json!([{"gpa": 3.9}]);
        assert_eq!(normalize(SectionKind::Education, &value), r#"{"gpa":3.9}"#);
    }

    #[test]
    fn test_skills_array_flattens_trims_and_dedupes() {
        let value = json!([" Rust ", "Go", ["Rust", "SQL"], "", 42, "Go"]);
        assert_eq!(
            normalize(SectionKind::Skills, &value),
            "Rust, Go, SQL, 42"
        );
    }

    #[test]
    fn test_meta_keywords_behave_like_skills() {
        let value = json!(["resume", "portfolio", "resume"]);
        assert_eq!(
            normalize(SectionKind::MetaKeywords, &value),
            "resume, portfolio"
        );
    }

    #[test]
    fn test_testimonials_example() {
        let value = json!([{"quote": "Great work", "author": "Jane", "title": "CTO"}]);
        assert_eq!(
            normalize(SectionKind::Testimonials, &value),
            "“Great work” — Jane, CTO"
        );
    }

    #[test]
    fn test_testimonials_blocks_separated_by_blank_line() {
        let value = json!([
            {"text": "Reliable", "name": "Sam"},
            "Plain praise"
        ]);
        assert_eq!(
            normalize(SectionKind::Testimonials, &value),
            "“Reliable” — Sam\n\nPlain praise"
        );
    }

    #[test]
    fn test_services_drop_blank_entries() {
        let value = json!(["Consulting", "  ", {"name": "Audits"}]);
        assert_eq!(
            normalize(SectionKind::Services, &value),
            "Consulting\n{\"name\":\"Audits\"}"
        );
    }

    #[test]
    fn test_default_array_is_dash_prefixed() {
        let value = json!(["English", "German"]);
        assert_eq!(
            normalize(SectionKind::Languages, &value),
            "- English\n- German"
        );
    }

    #[test]
    fn test_skills_object_keeps_key_order() {
        let value = json!({"Languages": ["Rust", "Go"], "Cloud": "AWS"});
        assert_eq!(
            normalize(SectionKind::Skills, &value),
            "Languages: Rust, Go\nCloud: AWS"
        );
    }

    #[test]
    fn test_contact_object_labels_present_fields() {
        let value = json!({"email": "a@b.c", "website": "https://a.dev", "twitter": "@a"});
        assert_eq!(
            normalize(SectionKind::Contact, &value),
            "Email: a@b.c | Website: https://a.dev"
        );
    }

    #[test]
    fn test_contact_without_known_fields_is_pretty_json() {
        let value = json!({"twitter": "@a"});
        assert_eq!(
            normalize(SectionKind::Contact, &value),
            "{\n  \"twitter\": \"@a\"\n}"
        );
    }

    #[test]
    fn test_other_object_is_pretty_json() {
        let value = json!({"headline": "Engineer"});
        let text = normalize(SectionKind::About, &value);
        assert!(text.contains("\"headline\": \"Engineer\""));
    }

    #[test]
    fn test_idempotent_on_normalized_output() {
        let inputs = [
            json!([{"degree": "BSc", "school": "MIT"}]),
            json!(["Rust", "Go"]),
            json!({"email": "x@y.z"}),
            json!([{"title": "Dev", "bullets": ["a"]}]),
        ];
        for kind in SectionKind::ALL {
            for input in &inputs {
                let once = normalize(kind, input);
                let twice = normalize(kind, &Value::String(once.clone()));
                assert_eq!(once, twice, "kind {kind}");
            }
        }
    }

    #[test]
    fn test_total_over_every_kind_and_shape() {
        let shapes = [
            Value::Null,
            json!(""),
            json!(1.5),
            json!(false),
            json!([]),
            json!({}),
            json!([null, [], {}, [[1]], {"bullets": "not-an-array"}]),
            json!({"nested": {"deep": [1, {"x": null}]}}),
        ];
        for kind in SectionKind::ALL {
            for shape in &shapes {
                let _ = normalize(kind, shape);
            }
        }
    }
}
