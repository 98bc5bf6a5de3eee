//! Contact block extraction.

use regex::Regex;

use crate::model::ContactInfo;

/// Pattern-based extractor for the lines between the name and the first
/// section.
pub struct ContactExtractor {
    email: Regex,
    phone: Regex,
    linkedin: Regex,
    github: Regex,
    /// Phone digits without the optional parentheses
    bare_phone: Regex,
}

impl ContactExtractor {
    /// Create an extractor with the built-in patterns.
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap(),
            phone: Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
            linkedin: Regex::new(r"[Ll]inked[Ii]n:\s*([\w.\-/]+)").unwrap(),
            github: Regex::new(r"[Gg]it[Hh]ub:\s*([\w.\-/]+)").unwrap(),
            bare_phone: Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        }
    }

    /// Extract contact fields from trimmed, non-empty contact lines.
    pub fn extract(&self, lines: &[&str]) -> ContactInfo {
        let text = lines.join(" ");
        let mut contact = ContactInfo::default();

        if let Some(m) = self.email.find(&text) {
            contact.email = m.as_str().to_string();
        }
        if let Some(m) = self.phone.find(&text) {
            contact.phone = m.as_str().to_string();
        }
        if let Some(caps) = self.linkedin.captures(&text) {
            contact.linkedin = caps[1].to_string();
        }
        if let Some(caps) = self.github.captures(&text) {
            contact.github = caps[1].to_string();
        }

        contact.location = lines
            .iter()
            .filter_map(|line| line.split('|').next())
            .map(str::trim)
            .find(|candidate| !candidate.is_empty() && self.looks_like_location(candidate))
            .unwrap_or_default()
            .to_string();

        contact
    }

    /// A location candidate carries no other contact detail.
    fn looks_like_location(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        !candidate.contains('@')
            && !lower.contains("linkedin")
            && !lower.contains("github")
            && !self.bare_phone.is_match(candidate)
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}
