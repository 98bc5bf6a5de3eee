//! # resume-export
//!
//! Turn Markdown resumes into ATS-friendly DOCX files and check them.
//!
//! The pipeline has three stages:
//!
//! 1. [`ResumeParser`] reads heading/bullet-convention text into a [`Resume`]
//! 2. [`render()`] lays the resume out as a [`RenderedDocument`], which is
//!    written as DOCX, plain text or JSON
//! 3. [`AtsValidator`] inspects a DOCX artifact and reports on ATS compliance
//!
//! ## Quick Start
//!
//! ```no_run
//! use resume_export::{parse_file, render_to_docx, validate_file, StyleConfig};
//!
//! fn main() -> resume_export::Result<()> {
//!     let resume = parse_file("Resume.md")?;
//!     render_to_docx(&resume, &StyleConfig::default(), "Resume.docx")?;
//!
//!     let report = validate_file("Resume.docx");
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Forgiving parser**: name, contact line, skills, jobs, education and
//!   certifications from loosely formatted Markdown
//! - **Styled output**: fonts, margins and spacing from a YAML style file
//! - **ATS checks**: file size, fonts, tables, images, sections, length and
//!   spacing, with a grouped text report
//! - **Batch export**: every resume in a directory tree, in parallel

pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, ArtifactFormat};
pub use error::{Error, Result};
pub use export::{ExportResult, Exporter, ExporterRegistry, ResumeExporter};
pub use model::{
    Alignment, Block, ContactInfo, EducationEntry, JobEntry, Paragraph, ParagraphStyle,
    RenderedDocument, Resume, SectionKind, TextRun, TextStyle,
};
pub use parser::{ParseOptions, ResumeParser};
pub use render::{JsonFormat, StyleConfig};
pub use validate::{
    AtsValidator, RuleConfig, Severity, ValidationReport, ValidationResult,
};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Parse a resume file.
///
/// # Example
///
/// ```no_run
/// use resume_export::parse_file;
///
/// let resume = parse_file("Resume.md").unwrap();
/// println!("{} ({} jobs)", resume.name, resume.experience.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Resume> {
    let parser = ResumeParser::open(path)?;
    Ok(parser.parse())
}

/// Parse a resume file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Resume> {
    let parser = ResumeParser::open_with_options(path, options)?;
    Ok(parser.parse())
}

/// Parse resume text already in memory.
pub fn parse_str(text: &str) -> Resume {
    ResumeParser::from_text(text).parse()
}

/// Lay out a resume as styled blocks.
pub fn render(resume: &Resume, style: &StyleConfig) -> RenderedDocument {
    render::render(resume, style)
}

/// Render a resume and write it as a DOCX file.
///
/// # Example
///
/// ```no_run
/// use resume_export::{parse_str, render_to_docx, StyleConfig};
///
/// let resume = parse_str("# Jane Doe\n\n## Summary\nBuilds things.\n");
/// render_to_docx(&resume, &StyleConfig::default(), "Jane.docx").unwrap();
/// ```
pub fn render_to_docx<P: AsRef<Path>>(resume: &Resume, style: &StyleConfig, path: P) -> Result<()> {
    let doc = render::render(resume, style);
    render::write_docx(&doc, path)
}

/// Parse a resume file and return the plain-text projection of its layout.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let resume = parse_file(path)?;
    let doc = render::render(&resume, &StyleConfig::default());
    Ok(render::to_text(&doc))
}

/// Parse a resume file and return it as JSON.
///
/// # Example
///
/// ```no_run
/// use resume_export::{to_json, JsonFormat};
///
/// let json = to_json("Resume.md", JsonFormat::Pretty).unwrap();
/// std::fs::write("resume.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let resume = parse_file(path)?;
    render::to_json(&resume, format)
}

/// Check a DOCX file with the default rules.
pub fn validate_file<P: AsRef<Path>>(path: P) -> ValidationReport {
    AtsValidator::default().validate_path(path)
}

/// Check DOCX bytes with the default rules.
pub fn validate_bytes(data: &[u8]) -> ValidationReport {
    AtsValidator::default().validate_bytes(data)
}

/// Export a resume file with default settings. See [`ResumeExporter::export`].
pub fn export_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    validate: bool,
) -> ExportResult {
    ResumeExporter::new().export(input, output, validate)
}

/// Builder for parsing and rendering resumes.
///
/// # Example
///
/// ```no_run
/// use resume_export::ResumeExport;
///
/// let report = ResumeExport::new()
///     .with_body_font("Arial")
///     .with_margins(0.75)
///     .parse("Resume.md")?
///     .validate()?;
/// println!("{}", report);
/// # Ok::<(), resume_export::Error>(())
/// ```
pub struct ResumeExport {
    parse_options: ParseOptions,
    style: StyleConfig,
    rules: RuleConfig,
    created: Option<DateTime<Utc>>,
}

impl ResumeExport {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            style: StyleConfig::default(),
            rules: RuleConfig::default(),
            created: None,
        }
    }

    /// Keep the source text exactly as read.
    pub fn raw(mut self) -> Self {
        self.parse_options = self.parse_options.raw();
        self
    }

    /// Set the name used when the source has none.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_default_name(name);
        self
    }

    /// Set the rendering style.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Load style and rules from a YAML style file.
    pub fn with_style_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        self.style = StyleConfig::load(path)?;
        self.rules = RuleConfig::from_style_file(path)?;
        Ok(self)
    }

    /// Set the body font family.
    pub fn with_body_font(mut self, name: impl Into<String>) -> Self {
        self.style = self.style.with_body_font(name);
        self
    }

    /// Set all page margins, in inches.
    pub fn with_margins(mut self, inches: f32) -> Self {
        self.style = self.style.with_margins(inches);
        self
    }

    /// Set the validator rules.
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Stamp rendered documents with a creation time.
    pub fn with_created(mut self, at: DateTime<Utc>) -> Self {
        self.created = Some(at);
        self
    }

    /// Parse a resume file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<ResumeExportResult> {
        let parser = ResumeParser::open_with_options(path, self.parse_options)?;
        Ok(ResumeExportResult {
            resume: parser.parse(),
            style: self.style,
            rules: self.rules,
            created: self.created,
        })
    }

    /// Parse resume text already in memory.
    pub fn parse_str(self, text: &str) -> ResumeExportResult {
        let parser = ResumeParser::from_text_with_options(text, self.parse_options);
        ResumeExportResult {
            resume: parser.parse(),
            style: self.style,
            rules: self.rules,
            created: self.created,
        }
    }
}

impl Default for ResumeExport {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed resume plus the style and rules to apply to it.
pub struct ResumeExportResult {
    /// The parsed resume
    pub resume: Resume,
    style: StyleConfig,
    rules: RuleConfig,
    created: Option<DateTime<Utc>>,
}

impl ResumeExportResult {
    /// Lay out the resume.
    pub fn to_document(&self) -> RenderedDocument {
        let mut doc = render::render(&self.resume, &self.style);
        doc.properties.created = self.created;
        doc
    }

    /// Serialize to DOCX bytes.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>> {
        render::to_docx_bytes(&self.to_document())
    }

    /// Write a DOCX file.
    pub fn write_docx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_docx(&self.to_document(), path)
    }

    /// Plain-text projection of the layout.
    pub fn to_text(&self) -> String {
        render::to_text(&self.to_document())
    }

    /// Convert the parsed resume to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.resume, format)
    }

    /// Render to DOCX in memory and check the result.
    pub fn validate(&self) -> Result<ValidationReport> {
        let bytes = self.to_docx_bytes()?;
        Ok(AtsValidator::new(self.rules.clone()).validate_bytes(&bytes))
    }

    /// Get the parsed resume.
    pub fn resume(&self) -> &Resume {
        &self.resume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "# Jane Doe\nNYC | jane@x.io\n\n## Summary\nBuilds things.\n\n## Experience\n### Engineer | Acme\n*2020 - Present*\n- Shipped\n\n## Education\n**BS CS** | MIT | 2019\n";

    #[test]
    fn test_parse_str() {
        let resume = parse_str(SOURCE);
        assert_eq!(resume.name, "Jane Doe");
        assert_eq!(resume.contact.location, "NYC");
        assert_eq!(resume.experience.len(), 1);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/no/such/Resume.md");
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ResumeExport::default();
        assert!(builder.parse_options.normalize_unicode);
        assert_eq!(builder.rules, RuleConfig::default());
    }

    #[test]
    fn test_builder_chained() {
        let builder = ResumeExport::new()
            .raw()
            .with_default_name("Candidate")
            .with_body_font("Arial")
            .with_margins(0.5);

        assert!(!builder.parse_options.normalize_unicode);
        assert_eq!(builder.style.fonts.body.name, "Arial");
        assert_eq!(builder.style.margins.left, 0.5);

        let result = builder.parse_str("## Skills\n- Rust\n");
        assert_eq!(result.resume().name, "Candidate");
    }

    #[test]
    fn test_builder_validate_round_trip() {
        let report = ResumeExport::new().parse_str(SOURCE).validate().unwrap();
        assert!(report.is_valid);
        let fonts = report
            .results
            .iter()
            .find(|r| r.check_name == "Fonts")
            .unwrap();
        assert!(fonts.passed);
    }

    #[test]
    fn test_builder_non_ats_font() {
        let report = ResumeExport::new()
            .with_body_font("Comic Sans MS")
            .parse_str(SOURCE)
            .validate()
            .unwrap();
        assert!(report.is_valid);
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].starts_with("Non-ATS fonts detected: Comic Sans MS."));
    }

    #[test]
    fn test_builder_created_timestamp() {
        use chrono::TimeZone;
        use std::io::Read;

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let result = ResumeExport::new().with_created(at).parse_str(SOURCE);
        assert_eq!(result.to_document().properties.created, Some(at));

        let bytes = result.to_docx_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        assert!(core.contains("2024-03-01T09:30:00Z"));

        let unstamped = ResumeExport::new().parse_str(SOURCE).to_document();
        assert_eq!(unstamped.properties.created, None);
    }

    #[test]
    fn test_builder_missing_style_file() {
        let result = ResumeExport::new().with_style_file("/no/such/styles.yaml");
        assert!(matches!(result, Err(Error::StyleAssetMissing(_))));
    }

    #[test]
    fn test_validate_bytes_invalid() {
        let report = validate_bytes(b"not a docx");
        assert!(!report.is_valid);
        assert_eq!(report.results[0].check_name, "File Format");
    }

    #[test]
    fn test_to_text_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Resume.md");
        std::fs::write(&path, SOURCE).unwrap();

        let text = to_text(&path).unwrap();
        assert!(text.starts_with("JANE DOE"));
        assert!(text.contains("PROFESSIONAL EXPERIENCE"));

        let json = to_json(&path, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"name\":\"Jane Doe\""));
    }
}
