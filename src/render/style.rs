//! Style configuration for the DOCX renderer.
//!
//! Loaded from YAML. Every key is optional; anything missing falls back to
//! the built-in ATS-friendly defaults and unknown keys are ignored.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::model::{PageSetup, TextStyle};

/// Fonts, margins and spacing used when rendering a resume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font roles
    pub fonts: Fonts,

    /// Page margins in inches
    pub margins: Margins,

    /// Paragraph spacing in points
    pub spacing: Spacing,
}

impl StyleConfig {
    /// Create the built-in style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a style file.
    ///
    /// Returns [`Error::StyleAssetMissing`] when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::StyleAssetMissing(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load a style file if one was given, otherwise use the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Set the body font family.
    pub fn with_body_font(mut self, name: impl Into<String>) -> Self {
        self.fonts.body.name = name.into();
        self
    }

    /// Set all four margins, in inches.
    pub fn with_margins(mut self, inches: f32) -> Self {
        self.margins = Margins {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        };
        self
    }

    /// Letter page with the configured margins.
    pub fn page_setup(&self) -> PageSetup {
        PageSetup::letter().with_margins_inches(
            self.margins.top,
            self.margins.bottom,
            self.margins.left,
            self.margins.right,
        )
    }
}

/// One font role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Font family
    pub name: String,

    /// Size in points
    pub size: f32,

    /// Bold weight; each role has its own default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Family used when `name` is blank
    pub fallback: String,
}

impl FontSpec {
    /// Create a regular-weight spec with an Arial fallback.
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            size,
            bold: None,
            fallback: "Arial".to_string(),
        }
    }

    /// Set the bold flag.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Configured weight, or `default` when unset.
    pub fn is_bold(&self, default: bool) -> bool {
        self.bold.unwrap_or(default)
    }

    /// Effective family name.
    pub fn family(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.fallback
        } else {
            &self.name
        }
    }

    /// Regular-weight text style for a run in this role.
    pub fn text_style(&self) -> TextStyle {
        TextStyle::new(self.family(), self.size)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Calibri", 11.0)
    }
}

/// Keys given for one font role; anything absent keeps the role default.
#[derive(Deserialize)]
struct FontOverride {
    name: Option<String>,
    size: Option<f32>,
    bold: Option<bool>,
    fallback: Option<String>,
}

impl FontOverride {
    fn apply(self, mut spec: FontSpec) -> FontSpec {
        if let Some(name) = self.name {
            spec.name = name;
        }
        if let Some(size) = self.size {
            spec.size = size;
        }
        if self.bold.is_some() {
            spec.bold = self.bold;
        }
        if let Some(fallback) = self.fallback {
            spec.fallback = fallback;
        }
        spec
    }
}

fn merge_role<'de, D>(
    deserializer: D,
    role: fn(Fonts) -> FontSpec,
) -> std::result::Result<FontSpec, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = FontOverride::deserialize(deserializer)?;
    Ok(overrides.apply(role(Fonts::default())))
}

fn body_font<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<FontSpec, D::Error> {
    merge_role(d, |f| f.body)
}

fn name_font<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<FontSpec, D::Error> {
    merge_role(d, |f| f.name)
}

fn section_header_font<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<FontSpec, D::Error> {
    merge_role(d, |f| f.section_header)
}

fn job_title_font<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<FontSpec, D::Error> {
    merge_role(d, |f| f.job_title)
}

fn dates_font<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<FontSpec>, D::Error> {
    merge_role(d, |f| f.body).map(Some)
}

/// Font roles.
///
/// A role given only in part keeps that role's defaults for the missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    #[serde(deserialize_with = "body_font")]
    pub body: FontSpec,
    #[serde(deserialize_with = "name_font")]
    pub name: FontSpec,
    #[serde(deserialize_with = "section_header_font")]
    pub section_header: FontSpec,
    #[serde(deserialize_with = "job_title_font")]
    pub job_title: FontSpec,

    /// Job dates; the body font is used when absent
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "dates_font"
    )]
    pub dates: Option<FontSpec>,
}

impl Fonts {
    /// Font used for job dates.
    pub fn dates(&self) -> &FontSpec {
        self.dates.as_ref().unwrap_or(&self.body)
    }
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            body: FontSpec::new("Calibri", 11.0),
            name: FontSpec::new("Calibri", 16.0).bold(true),
            section_header: FontSpec::new("Calibri", 12.0).bold(true),
            job_title: FontSpec::new("Calibri", 11.0).bold(true),
            dates: None,
        }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 1.0,
            bottom: 1.0,
            left: 1.0,
            right: 1.0,
        }
    }
}

/// Spacing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Line spacing multiplier
    pub line: f32,

    /// Space after body paragraphs, in points
    pub paragraph: f32,

    /// Space after each section, in points
    pub section: f32,

    /// Space before a section header, in points
    pub before_header: f32,

    /// Space after a section header, in points
    pub after_header: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            line: 1.0,
            paragraph: 6.0,
            section: 12.0,
            before_header: 6.0,
            after_header: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.fonts.body.name, "Calibri");
        assert_eq!(style.fonts.body.fallback, "Arial");
        assert!(style.fonts.name.is_bold(false));
        assert!(!style.fonts.body.is_bold(false));
        assert_eq!(style.fonts.name.size, 16.0);
        assert_eq!(style.fonts.dates(), &style.fonts.body);
        assert_eq!(style.spacing.section, 12.0);
        assert_eq!(style.margins.left, 1.0);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
fonts:
  body:
    name: Georgia
    size: 10.5
  dates:
    name: Arial
    size: 10
margins:
  left: 0.75
spacing:
  section: 18
theme: ignored
"#;
        let style = StyleConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(style.fonts.body.name, "Georgia");
        assert_eq!(style.fonts.body.size, 10.5);
        assert_eq!(style.fonts.body.fallback, "Arial");
        assert_eq!(style.fonts.dates().name, "Arial");
        assert_eq!(style.fonts.section_header.size, 12.0);
        assert!(style.fonts.section_header.is_bold(false));
        assert_eq!(style.margins.left, 0.75);
        assert_eq!(style.margins.top, 1.0);
        assert_eq!(style.spacing.section, 18.0);
        assert_eq!(style.spacing.paragraph, 6.0);
    }

    #[test]
    fn test_partial_role_keeps_role_defaults() {
        let yaml = "fonts:\n  name:\n    name: Arial\n  section_header:\n    name: Georgia\n  job_title:\n    size: 12\n";
        let style = StyleConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(style.fonts.name.name, "Arial");
        assert_eq!(style.fonts.name.size, 16.0);
        assert!(style.fonts.name.is_bold(false));
        assert_eq!(style.fonts.section_header.family(), "Georgia");
        assert_eq!(style.fonts.section_header.size, 12.0);
        assert!(style.fonts.section_header.is_bold(false));
        assert_eq!(style.fonts.job_title.name, "Calibri");
        assert_eq!(style.fonts.job_title.size, 12.0);
        assert!(style.fonts.job_title.is_bold(false));
        assert_eq!(style.fonts.body, FontSpec::default());
    }

    #[test]
    fn test_style_round_trips_through_yaml() {
        let style = StyleConfig::new().with_body_font("Georgia");
        let yaml = serde_yaml::to_string(&style).unwrap();
        assert_eq!(StyleConfig::from_yaml_str(&yaml).unwrap(), style);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(StyleConfig::from_yaml_str("  \n").unwrap(), StyleConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = StyleConfig::from_yaml_str("fonts: [unclosed");
        assert!(matches!(result, Err(Error::StyleConfig(_))));
    }

    #[test]
    fn test_missing_style_file() {
        let result = StyleConfig::load("/no/such/styles.yaml");
        assert!(matches!(result, Err(Error::StyleAssetMissing(_))));

        let style = StyleConfig::load_or_default(None::<&Path>).unwrap();
        assert_eq!(style, StyleConfig::default());
    }

    #[test]
    fn test_font_fallback() {
        let spec = FontSpec {
            name: " ".into(),
            ..FontSpec::default()
        };
        assert_eq!(spec.family(), "Arial");
    }

    #[test]
    fn test_page_setup() {
        let page = StyleConfig::new().with_margins(0.5).page_setup();
        assert_eq!(page.margin_left, 36.0);
    }
}
