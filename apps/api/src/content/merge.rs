use std::collections::HashSet;

/// Appends the lines of `addition` that `existing` does not already contain.
///
/// Lines are compared trimmed, against `existing` only: an addition keeps its own
/// blank lines and repeats. When nothing is new, `existing` comes back untouched,
/// so `smart_merge(x, x) == x`.
pub fn smart_merge(existing: &str, addition: &str) -> String {
    if existing.trim().is_empty() {
        return addition.to_string();
    }

    let known: HashSet<&str> = existing.lines().map(str::trim).collect();
    let fresh: Vec<&str> = addition
        .lines()
        .filter(|line| !known.contains(line.trim()))
        .collect();

    if fresh.is_empty() {
        return existing.to_string();
    }
    format!(
        "{}\n{}",
        strip_trailing_blank_lines(existing),
        fresh.join("\n")
    )
}

/// Drops whitespace-only lines at the end; the last real line keeps its spacing.
fn strip_trailing_blank_lines(text: &str) -> &str {
    let content_end = text.trim_end().len();
    match text[content_end..].find(|c: char| c == '\n' || c == '\r') {
        Some(offset) => &text[..content_end + offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_existing_returns_addition() {
        assert_eq!(smart_merge("", "Tools: Docker"), "Tools: Docker");
        assert_eq!(smart_merge("  \n", "Tools: Docker"), "Tools: Docker");
    }

    #[test]
    fn test_merge_with_itself_is_identity() {
        let text = "Languages: Go, Python\n\nTools: Docker\n";
        assert_eq!(smart_merge(text, text), text);
    }

    #[test]
    fn test_dedupes_known_lines() {
        assert_eq!(
            smart_merge(
                "Languages: Go, Python",
                "Languages: Go, Python\nTools: Docker"
            ),
            "Languages: Go, Python\nTools: Docker"
        );
    }

    #[test]
    fn test_trailing_blank_lines_stripped_before_append() {
        assert_eq!(
            smart_merge("- Led team\n \n\n", "  - Led team  \n- Cut costs 10%"),
            "- Led team\n- Cut costs 10%"
        );
    }

    #[test]
    fn test_trailing_spaces_on_last_line_are_kept() {
        assert_eq!(smart_merge("Go  ", "Rust"), "Go  \nRust");
        assert_eq!(smart_merge("Go  \r\n\r\n", "Rust"), "Go  \nRust");
    }

    #[test]
    fn test_addition_keeps_its_own_blank_lines_and_repeats() {
        assert_eq!(
            smart_merge("Skills", "Rust\n\nGo\nGo"),
            "Skills\nRust\n\nGo\nGo"
        );
        assert_eq!(smart_merge("a\n\nb", "\nc"), "a\n\nb\nc");
    }

    #[test]
    fn test_preserves_addition_order() {
        assert_eq!(smart_merge("a", "c\nb\na"), "a\nc\nb");
    }
}
