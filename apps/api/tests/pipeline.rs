//! End-to-end checks of the content pipeline through the public library API.
//!
//! The text service is replaced by `OfflineCompletion` (degraded mode) or
//! `ScriptedCompletion` (canned answers), so nothing here touches the network.

use serde_json::json;

use folio::content::{
    diff_tokens, heuristic_score, normalize, normalize_field, smart_merge, DiffOp, Lexicon,
};
use folio::improvement::{apply_selected, generate_preview, Aggressiveness};
use folio::ingest::structure_import;
use folio::llm_client::mock::ScriptedCompletion;
use folio::llm_client::OfflineCompletion;
use folio::models::{CoreSections, SectionKind};

fn sections() -> CoreSections {
    CoreSections {
        summary: "Backend engineer.".to_string(),
        experience: "- Worked on the payments service\n- Helped with on-call".to_string(),
        skills: "Rust, Go".to_string(),
    }
}

fn rebuild(ops: &[DiffOp], keep: fn(&DiffOp) -> Option<&str>) -> String {
    ops.iter().filter_map(keep).collect()
}

#[test]
fn normalizer_is_idempotent_on_strings() {
    let samples = [
        "",
        "plain text",
        "- Led a team\n- Built a thing",
        "“Great work” — Jane, CTO",
    ];
    for kind in SectionKind::ALL {
        for sample in samples {
            let once = normalize(kind, &json!(sample));
            assert_eq!(normalize(kind, &json!(once.clone())), once, "{kind}");
        }
    }
}

#[test]
fn normalizer_is_total() {
    let values = [
        json!(null),
        json!(true),
        json!(3.5),
        json!([]),
        json!({}),
        json!([null, 1, "x", [2, {"a": []}], {"title": "Engineer"}]),
        json!({"nested": {"deep": [1, 2, {"k": null}]}}),
    ];
    for kind in SectionKind::ALL {
        for value in &values {
            let _ = normalize(kind, value);
        }
    }
}

#[test]
fn normalizer_examples() {
    assert_eq!(
        normalize_field(
            "education",
            &json!([{"degree": "BSc CS", "school": "MIT", "year": "2020"}])
        )
        .unwrap(),
        "BSc CS | MIT | 2020"
    );
    assert_eq!(
        normalize_field(
            "testimonials",
            &json!([{"quote": "Great work", "author": "Jane", "title": "CTO"}])
        )
        .unwrap(),
        "“Great work” — Jane, CTO"
    );
}

#[test]
fn diff_reconstructs_both_sides() {
    let a = "Worked on the  payments service\nfor 2 years";
    let b = "Led the payments service, cutting latency 30%\nfor 2 years";
    let ops = diff_tokens(a, b);

    let left = rebuild(&ops, |op| match op {
        DiffOp::Equal(t) | DiffOp::Del(t) => Some(t.as_str()),
        DiffOp::Add(_) => None,
    });
    let right = rebuild(&ops, |op| match op {
        DiffOp::Equal(t) | DiffOp::Add(t) => Some(t.as_str()),
        DiffOp::Del(_) => None,
    });
    assert_eq!(left, a);
    assert_eq!(right, b);
}

#[test]
fn diff_of_identical_text_is_all_equal() {
    let text = "Built  a\tpipeline.";
    assert!(diff_tokens(text, text)
        .iter()
        .all(|op| matches!(op, DiffOp::Equal(_))));
}

#[test]
fn heuristic_score_bounds_and_ordering() {
    assert_eq!(heuristic_score(""), 0);
    let long = "Led Built Created Optimized 1 2 3 4 5 ".repeat(500);
    assert!(heuristic_score(&long) <= 100);
    assert!(
        heuristic_score(
            "Led migration saving $50k. Reduced latency 30%. Built new pipeline."
        ) > heuristic_score("Did some stuff.")
    );
}

#[test]
fn smart_merge_properties() {
    let x = "Languages: Go, Python";
    assert_eq!(smart_merge(x, x), x);
    assert_eq!(smart_merge("", "Tools: Docker"), "Tools: Docker");
    assert_eq!(
        smart_merge(x, "Languages: Go, Python\nTools: Docker"),
        "Languages: Go, Python\nTools: Docker"
    );
}

#[tokio::test]
async fn offline_preview_returns_originals() {
    let current = sections();
    let preview = generate_preview(
        &OfflineCompletion,
        &Lexicon::default(),
        &current,
        Aggressiveness::Bold,
    )
    .await;

    assert!(!preview.ai);
    for kind in [SectionKind::Summary, SectionKind::Experience, SectionKind::Skills] {
        let change = preview.improved_sections.get(kind).unwrap();
        assert_eq!(change.original, change.improved);
        assert_eq!(Some(change.original.as_str()), current.get(kind));
    }
}

#[tokio::test]
async fn apply_with_unchanged_skills_is_noop() {
    let current = sections();
    let completion = ScriptedCompletion::new(vec![Ok(json!({
        "summary": "Backend engineer shipping payment systems.",
        "skills": "Rust, Go"
    })
    .to_string())]);
    let lexicon = Lexicon::default();

    let preview = generate_preview(&completion, &lexicon, &current, Aggressiveness::Moderate).await;
    assert!(preview.ai);

    let outcome = apply_selected(
        &completion,
        &lexicon,
        &current,
        &["skills".to_string()],
        Some(preview.clone()),
    )
    .await
    .unwrap();
    assert!(!outcome.improved);
    assert_eq!(outcome.sections, current);

    let outcome = apply_selected(
        &completion,
        &lexicon,
        &current,
        &["summary".to_string(), "skills".to_string()],
        Some(preview),
    )
    .await
    .unwrap();
    assert!(outcome.improved);
    assert_eq!(
        outcome.sections.summary,
        "Backend engineer shipping payment systems."
    );
    assert_eq!(completion.calls(), 1);
}

#[tokio::test]
async fn import_falls_back_to_heuristic_offline() {
    let raw = "Jane Doe\nExperience\n• Built the ledger\nSkills\nRust; Go";
    let result = structure_import(&OfflineCompletion, raw).await;
    assert!(!result.ai);
    assert_eq!(result.summary, "Jane Doe");
    assert_eq!(result.experience, "- Built the ledger");
    assert_eq!(result.skills, "Rust, Go");
}
