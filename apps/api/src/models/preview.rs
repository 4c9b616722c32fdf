use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::section::{CoreSections, SectionKind};

/// Before/after pair for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionChange {
    pub original: String,
    pub improved: String,
}

impl SectionChange {
    pub fn unchanged(text: &str) -> Self {
        Self {
            original: text.to_string(),
            improved: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovedSections {
    pub summary: SectionChange,
    pub experience: SectionChange,
    pub skills: SectionChange,
}

impl ImprovedSections {
    pub fn get(&self, kind: SectionKind) -> Option<&SectionChange> {
        match kind {
            SectionKind::Summary => Some(&self.summary),
            SectionKind::Experience => Some(&self.experience),
            SectionKind::Skills => Some(&self.skills),
            _ => None,
        }
    }

    /// All three sections returned as-is.
    pub fn unchanged(sections: &CoreSections) -> Self {
        Self {
            summary: SectionChange::unchanged(&sections.summary),
            experience: SectionChange::unchanged(&sections.experience),
            skills: SectionChange::unchanged(&sections.skills),
        }
    }
}

/// One experience line position, original vs improved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletRecord {
    pub original: String,
    pub improved: String,
    pub changed: bool,
    pub metrics_added: bool,
    pub verbs_added: bool,
}

/// Result of an improvement pass. Request-scoped; nothing here is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementPreview {
    pub improved_sections: ImprovedSections,
    /// False when the text service was unavailable and sections came back unchanged.
    pub ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_summary: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub bullets: Vec<BulletRecord>,
}

/// Outcome of applying selected sections from a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub improved: bool,
    /// Sections whose value should be written back. Empty when `improved` is false.
    pub patch: BTreeMap<SectionKind, String>,
    /// Post-patch view of the three core sections.
    pub sections: CoreSections,
}
