//! Structured resume record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name used when the source has no top-level heading.
pub const DEFAULT_NAME: &str = "Resume";

/// A parsed resume.
///
/// Built once per parse call. Every collection keeps source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Candidate name (first top-level heading)
    pub name: String,

    /// Contact block found between the name and the first section
    pub contact: ContactInfo,

    /// Flattened summary text
    pub summary: String,

    /// Skill categories in source order
    pub skills: IndexMap<String, Vec<String>>,

    /// Work history in source order
    pub experience: Vec<JobEntry>,

    /// Education entries in source order
    pub education: Vec<EducationEntry>,

    /// Certification lines
    pub certifications: Vec<String>,

    /// Sections that are none of the above, keyed by their original name
    pub other_sections: IndexMap<String, String>,
}

impl Resume {
    /// Create an empty resume with the default name.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            ..Default::default()
        }
    }

    /// Classify a section name. See [`SectionKind::classify`].
    pub fn section_kind(name: &str) -> SectionKind {
        SectionKind::classify(name)
    }

    /// Total number of skill items across all categories.
    pub fn skill_count(&self) -> usize {
        self.skills.values().map(Vec::len).sum()
    }

    /// Check whether any section content was found.
    pub fn has_sections(&self) -> bool {
        !self.summary.is_empty()
            || !self.skills.is_empty()
            || !self.experience.is_empty()
            || !self.education.is_empty()
            || !self.certifications.is_empty()
            || !self.other_sections.is_empty()
    }
}

/// Contact details. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub location: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

impl ContactInfo {
    /// Check if no contact field is populated.
    pub fn is_empty(&self) -> bool {
        self.location.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.linkedin.is_empty()
            && self.github.is_empty()
            && self.website.is_empty()
    }
}

/// One position in the experience section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub description: String,
    pub achievements: Vec<String>,
}

/// One entry in the education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: String,
    pub details: Vec<String>,
}

/// Category a second-level section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Other,
}

impl SectionKind {
    /// Substring rules, checked in order. The first match wins.
    const RULES: [(&'static str, SectionKind); 5] = [
        ("summary", SectionKind::Summary),
        ("skill", SectionKind::Skills),
        ("experience", SectionKind::Experience),
        ("education", SectionKind::Education),
        ("certification", SectionKind::Certifications),
    ];

    /// Classify a section name by case-insensitive substring match.
    ///
    /// "Certifications & Summary of Qualifications" is a summary section:
    /// precedence is fixed, not inferred from intent.
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        Self::RULES
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, kind)| *kind)
            .unwrap_or(SectionKind::Other)
    }

    /// Check if this is a typed (non-other) section.
    pub fn is_known(&self) -> bool {
        !matches!(self, SectionKind::Other)
    }
}
