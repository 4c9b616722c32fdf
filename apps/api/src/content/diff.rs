//! Word diff engine — LCS over whitespace-preserving tokens.
//!
//! Inputs are short-form section text, so a dense O(n·m) table is fine here as
//! long as it stays under `MAX_DIFF_CELLS`.

use serde::{Deserialize, Serialize};

use crate::content::lexicon::Lexicon;
use crate::models::BulletRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum DiffOp {
    Equal(String),
    Add(String),
    Del(String),
}

/// Word counts over a diff script, whitespace tokens excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// Upper bound on LCS table cells (4 bytes each) for one diff.
pub const MAX_DIFF_CELLS: usize = 4_000_000;

/// Table size `diff_tokens` would need for `a` against `b`.
pub fn diff_cells(a: &str, b: &str) -> usize {
    (tokenize(a).len() + 1).saturating_mul(tokenize(b).len() + 1)
}

/// Splits `text` into alternating runs of whitespace and non-whitespace.
/// Concatenating the tokens yields `text` exactly.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Diffs `a` against `b` token by token.
///
/// `Equal` + `Del` ops reproduce `a`; `Equal` + `Add` ops reproduce `b`.
/// When both branches keep the same remaining LCS length, deletion goes first.
/// Over `MAX_DIFF_CELLS` the script is every `a` token deleted, then every `b`
/// token added.
pub fn diff_tokens(a: &str, b: &str) -> Vec<DiffOp> {
    let left = tokenize(a);
    let right = tokenize(b);
    let (n, m) = (left.len(), right.len());

    if (n + 1).saturating_mul(m + 1) > MAX_DIFF_CELLS {
        return left
            .iter()
            .map(|t| DiffOp::Del(t.to_string()))
            .chain(right.iter().map(|t| DiffOp::Add(t.to_string())))
            .collect();
    }

    // lcs[i * width + j] = LCS length of left[i..] and right[j..]
    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if left[i] == right[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if left[i] == right[j] {
            ops.push(DiffOp::Equal(left[i].to_string()));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            ops.push(DiffOp::Del(left[i].to_string()));
            i += 1;
        } else {
            ops.push(DiffOp::Add(right[j].to_string()));
            j += 1;
        }
    }
    ops.extend(left[i..].iter().map(|t| DiffOp::Del(t.to_string())));
    ops.extend(right[j..].iter().map(|t| DiffOp::Add(t.to_string())));
    ops
}

pub fn diff_stats(ops: &[DiffOp]) -> DiffStats {
    let mut stats = DiffStats::default();
    for op in ops {
        match op {
            DiffOp::Equal(t) if is_word(t) => stats.unchanged += 1,
            DiffOp::Add(t) if is_word(t) => stats.added += 1,
            DiffOp::Del(t) if is_word(t) => stats.removed += 1,
            _ => {}
        }
    }
    stats
}

fn is_word(token: &str) -> bool {
    !token.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Line classification
// ────────────────────────────────────────────────────────────────────────────

/// Compares one original line with its rewrite.
pub fn classify_line(original: &str, improved: &str, lexicon: &Lexicon) -> BulletRecord {
    let changed = original.trim() != improved.trim();
    let metrics_added = !has_metric(original) && has_metric(improved);
    let verbs_added = !opens_with_strong_verb(original, lexicon)
        && opens_with_strong_verb(improved, lexicon);

    BulletRecord {
        original: original.to_string(),
        improved: improved.to_string(),
        changed,
        metrics_added,
        verbs_added,
    }
}

/// Pairs lines by index; the shorter side is padded with empty lines.
pub fn pair_lines(original: &str, improved: &str, lexicon: &Lexicon) -> Vec<BulletRecord> {
    let before: Vec<&str> = original.lines().collect();
    let after: Vec<&str> = improved.lines().collect();
    let len = before.len().max(after.len());

    (0..len)
        .map(|i| {
            classify_line(
                before.get(i).copied().unwrap_or(""),
                after.get(i).copied().unwrap_or(""),
                lexicon,
            )
        })
        .collect()
}

fn has_metric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit() || c == '%')
}

/// First word after any bullet marker.
fn opens_with_strong_verb(line: &str, lexicon: &Lexicon) -> bool {
    line.trim_start_matches(|c: char| c == '-' || c == '•' || c == '*' || c.is_whitespace())
        .split_whitespace()
        .next()
        .is_some_and(|word| lexicon.is_strong_verb(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild_left(ops: &[DiffOp]) -> String {
        ops.iter()
            .filter_map(|op| match op {
                DiffOp::Equal(t) | DiffOp::Del(t) => Some(t.as_str()),
                DiffOp::Add(_) => None,
            })
            .collect()
    }

    fn rebuild_right(ops: &[DiffOp]) -> String {
        ops.iter()
            .filter_map(|op| match op {
                DiffOp::Equal(t) | DiffOp::Add(t) => Some(t.as_str()),
                DiffOp::Del(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_tokenize_keeps_whitespace_runs() {
        assert_eq!(
            tokenize("  Led\tthe  team\n"),
            vec!["  ", "Led", "\t", "the", "  ", "team", "\n"]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_round_trip_reconstructs_both_sides() {
        let cases = [
            ("", ""),
            ("", "new text"),
            ("old text", ""),
            ("Worked on the API", "Built the REST API serving 2M requests"),
            ("a b c d", "d c b a"),
            ("multi\nline  text", "multi\n\nline text ✓"),
        ];
        for (a, b) in cases {
            let ops = diff_tokens(a, b);
            assert_eq!(rebuild_left(&ops), a, "left side of {a:?} -> {b:?}");
            assert_eq!(rebuild_right(&ops), b, "right side of {a:?} -> {b:?}");
        }
    }

    #[test]
    fn test_identical_inputs_are_all_equal() {
        let text = "Reduced latency 30% across  3 regions";
        let ops = diff_tokens(text, text);
        assert!(ops.iter().all(|op| matches!(op, DiffOp::Equal(_))));
    }

    #[test]
    fn test_single_word_replacement() {
        let ops = diff_tokens("Helped build it", "Led build it");
        assert_eq!(
            ops,
            vec![
                DiffOp::Del("Helped".to_string()),
                DiffOp::Add("Led".to_string()),
                DiffOp::Equal(" ".to_string()),
                DiffOp::Equal("build".to_string()),
                DiffOp::Equal(" ".to_string()),
                DiffOp::Equal("it".to_string()),
            ]
        );
    }

    #[test]
    fn test_oversized_inputs_fall_back_to_replace_all() {
        let a = "a ".repeat(60_000);
        let b = "b ".repeat(60_000);
        assert!(diff_cells(&a, &b) > MAX_DIFF_CELLS);

        let ops = diff_tokens(&a, &b);
        assert_eq!(ops.len(), 240_000);
        assert!(ops[..120_000].iter().all(|op| matches!(op, DiffOp::Del(_))));
        assert!(ops[120_000..].iter().all(|op| matches!(op, DiffOp::Add(_))));

        let left: String = ops
            .iter()
            .filter_map(|op| match op {
                DiffOp::Del(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(left, a);
    }

    #[test]
    fn test_diff_op_wire_format() {
        let json = serde_json::to_value(DiffOp::Del("x".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "del", "text": "x"}));
    }

    #[test]
    fn test_diff_stats_ignore_whitespace_tokens() {
        let ops = diff_tokens("ship code", "ship more code");
        let stats = diff_stats(&ops);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.removed, 0);
        assert_eq!(stats.unchanged, 2);
    }

    #[test]
    fn test_classify_metrics_and_verbs_added() {
        let lex = Lexicon::default();
        let record = classify_line(
            "- Worked on search",
            "- Optimized search, cutting p95 latency 40%",
            &lex,
        );
        assert!(record.changed);
        assert!(record.metrics_added);
        assert!(record.verbs_added);
    }

    #[test]
    fn test_classify_existing_metric_is_not_added() {
        let lex = Lexicon::default();
        let record = classify_line("Led 3 launches", "Led 5 launches", &lex);
        assert!(record.changed);
        assert!(!record.metrics_added);
        assert!(!record.verbs_added);
    }

    #[test]
    fn test_classify_whitespace_only_change_is_unchanged() {
        let lex = Lexicon::default();
        assert!(!classify_line("  Built it ", "Built it", &lex).changed);
    }

    #[test]
    fn test_pair_lines_pads_shorter_side() {
        let lex = Lexicon::default();
        let records = pair_lines("one\ntwo", "one\ntwo\nBuilt three", &lex);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].original, "");
        assert!(records[2].changed);
        assert!(records[2].verbs_added);

        let records = pair_lines("a\nb\nc", "a", &lex);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].improved, "");
    }
}
