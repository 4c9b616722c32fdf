use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Every named text block a resume/portfolio record can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Summary,
    Experience,
    Projects,
    Education,
    Certifications,
    Skills,
    Achievements,
    Languages,
    Publications,
    VolunteerWork,
    Interests,
    References,
    Testimonials,
    Services,
    Contact,
    About,
    MetaKeywords,
}

impl SectionKind {
    pub const ALL: [SectionKind; 17] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Education,
        SectionKind::Certifications,
        SectionKind::Skills,
        SectionKind::Achievements,
        SectionKind::Languages,
        SectionKind::Publications,
        SectionKind::VolunteerWork,
        SectionKind::Interests,
        SectionKind::References,
        SectionKind::Testimonials,
        SectionKind::Services,
        SectionKind::Contact,
        SectionKind::About,
        SectionKind::MetaKeywords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Education => "education",
            SectionKind::Certifications => "certifications",
            SectionKind::Skills => "skills",
            SectionKind::Achievements => "achievements",
            SectionKind::Languages => "languages",
            SectionKind::Publications => "publications",
            SectionKind::VolunteerWork => "volunteerWork",
            SectionKind::Interests => "interests",
            SectionKind::References => "references",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Services => "services",
            SectionKind::Contact => "contact",
            SectionKind::About => "about",
            SectionKind::MetaKeywords => "metaKeywords",
        }
    }

    /// The three sections the improvement pass rewrites.
    pub fn is_improvable(&self) -> bool {
        matches!(
            self,
            SectionKind::Summary | SectionKind::Experience | SectionKind::Skills
        )
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .iter()
            .find(|k| k.as_str() == s.trim())
            .copied()
            .ok_or_else(|| AppError::InputShapeUnsupported(format!("unknown section '{s}'")))
    }
}

/// Current text of the sections the improvement pass works on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSections {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: String,
}

impl CoreSections {
    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        match kind {
            SectionKind::Summary => Some(&self.summary),
            SectionKind::Experience => Some(&self.experience),
            SectionKind::Skills => Some(&self.skills),
            _ => None,
        }
    }

    /// Overwrites one of the three core sections. Other kinds are ignored.
    pub fn set(&mut self, kind: SectionKind, value: String) {
        match kind {
            SectionKind::Summary => self.summary = value,
            SectionKind::Experience => self.experience = value,
            SectionKind::Skills => self.skills = value,
            _ => {}
        }
    }
}
