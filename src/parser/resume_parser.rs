//! Markdown resume parser.

use std::fs;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use unicode_normalization::UnicodeNormalization;

use super::contact::ContactExtractor;
use super::options::ParseOptions;
use super::sections::{
    self, EducationState, ExperienceState, SectionPatterns, SkillsState,
};
use crate::error::{Error, Result};
use crate::model::{Resume, SectionKind};

/// Parses heading/bullet-convention resume text into a [`Resume`].
///
/// The source is read once when the parser is created; [`parse`](Self::parse)
/// only works on the owned text and never fails.
pub struct ResumeParser {
    content: String,
    options: ParseOptions,
    contact: ContactExtractor,
    patterns: SectionPatterns,
}

impl ResumeParser {
    /// Open a resume file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a resume file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::SourceNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::from_text_with_options(content, options))
    }

    /// Create a parser over in-memory text.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::from_text_with_options(content, ParseOptions::default())
    }

    /// Create a parser over in-memory text with custom options.
    pub fn from_text_with_options(content: impl Into<String>, options: ParseOptions) -> Self {
        let content = content.into();
        let content = if options.normalize_unicode {
            content.nfc().collect()
        } else {
            content
        };

        Self {
            content: content.replace("\r\n", "\n"),
            options,
            contact: ContactExtractor::new(),
            patterns: SectionPatterns::new(),
        }
    }

    /// Read the whole source from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::from_text(content))
    }

    /// Get the source text being parsed.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the source into a structured resume.
    pub fn parse(&self) -> Resume {
        let mut resume = Resume {
            name: self.extract_name(),
            contact: self.contact.extract(&self.contact_lines()),
            ..Default::default()
        };

        for (name, content) in self.split_sections() {
            match SectionKind::classify(&name) {
                SectionKind::Summary => resume.summary = sections::parse_summary(&content),
                SectionKind::Skills => {
                    resume.skills = sections::run(SkillsState::new(&self.patterns), &content)
                }
                SectionKind::Experience => {
                    resume.experience =
                        sections::run(ExperienceState::new(&self.patterns), &content)
                }
                SectionKind::Education => {
                    resume.education = sections::run(EducationState::new(&self.patterns), &content)
                }
                SectionKind::Certifications => {
                    resume.certifications = sections::parse_certifications(&content)
                }
                SectionKind::Other => {
                    resume.other_sections.insert(name, content);
                }
            }
        }

        resume
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    /// Text of the first `# ` heading.
    fn extract_name(&self) -> String {
        self.lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("# "))
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| self.options.default_name.clone())
    }

    /// Trimmed, non-empty lines after a `# ` heading and before the first
    /// `## ` heading.
    fn contact_lines(&self) -> Vec<&str> {
        let mut in_contact = false;
        let mut lines = Vec::new();

        for line in self.lines().map(str::trim) {
            if line.starts_with("# ") {
                in_contact = true;
                continue;
            }
            if line.starts_with("## ") {
                break;
            }
            if in_contact && !line.is_empty() {
                lines.push(line);
            }
        }

        lines
    }

    /// Split on lines beginning with `## `, keeping raw section text.
    ///
    /// A repeated section name replaces the earlier content but keeps the
    /// earlier position.
    fn split_sections(&self) -> IndexMap<String, String> {
        let mut sections = IndexMap::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in self.lines() {
            if let Some(heading) = line.strip_prefix("## ") {
                if let Some((name, body)) = current.take() {
                    sections.insert(name, body.join("\n"));
                }
                current = Some((heading.trim().to_string(), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }

        if let Some((name, body)) = current {
            sections.insert(name, body.join("\n"));
        }

        sections
    }
}
