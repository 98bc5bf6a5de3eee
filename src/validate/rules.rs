//! Rule configuration for the compliance validator.
//!
//! Only the list of standard section names can be overridden. It is read
//! from the `ats_rules.standard_sections` key of a style file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Section titles an ATS expects to find.
pub const DEFAULT_STANDARD_SECTIONS: [&str; 9] = [
    "Summary",
    "Professional Summary",
    "Core Skills",
    "Skills",
    "Technical Skills",
    "Experience",
    "Professional Experience",
    "Work Experience",
    "Education",
];

/// Overridable validator rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Names searched for (case-insensitively) in paragraph text
    pub standard_sections: Vec<String>,
}

impl RuleConfig {
    /// Create the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the standard section list.
    pub fn with_standard_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standard_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Read `ats_rules` from a style YAML document; defaults when absent.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct StyleFile {
            ats_rules: Option<RuleConfig>,
        }

        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: StyleFile = serde_yaml::from_str(yaml)?;
        Ok(file.ats_rules.unwrap_or_default())
    }

    /// Read `ats_rules` from a style file.
    ///
    /// Returns [`Error::StyleAssetMissing`] when the file does not exist.
    pub fn from_style_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::StyleAssetMissing(path.to_path_buf()));
        }
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            standard_sections: DEFAULT_STANDARD_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections() {
        let rules = RuleConfig::default();
        assert_eq!(rules.standard_sections.len(), 9);
        assert_eq!(rules.standard_sections[0], "Summary");
    }

    #[test]
    fn test_from_style_yaml() {
        let yaml = r#"
fonts:
  body:
    name: Arial
ats_rules:
  standard_sections:
    - Work History
    - Education
"#;
        let rules = RuleConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(rules.standard_sections, vec!["Work History", "Education"]);

        let rules = RuleConfig::from_yaml_str("fonts: {}").unwrap();
        assert_eq!(rules, RuleConfig::default());
    }

    #[test]
    fn test_missing_rules_file() {
        let result = RuleConfig::from_style_file("/missing/styles.yaml");
        assert!(matches!(result, Err(Error::StyleAssetMissing(_))));
    }
}
