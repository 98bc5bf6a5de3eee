//! Parse, render, write and validate in one call.

use std::path::{Path, PathBuf};

use chrono::Utc;
use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use super::ExporterRegistry;
use crate::error::{Error, Result};
use crate::parser::{ParseOptions, ResumeParser};
use crate::render::{render, StyleConfig};
use crate::validate::{AtsValidator, RuleConfig, ValidationReport};

/// Outcome of exporting one resume.
///
/// Failures are recorded in `errors`; an export never panics or returns
/// `Err`. When validation ran, failed critical checks are appended to
/// `errors` and the other failed checks to `warnings`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// The output file was written
    pub success: bool,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Compliance report, when validation was requested
    pub validation: Option<ValidationReport>,
}

impl ExportResult {
    fn new(input_file: &Path, output_file: &Path) -> Self {
        Self {
            success: false,
            input_file: input_file.to_path_buf(),
            output_file: output_file.to_path_buf(),
            errors: Vec::new(),
            warnings: Vec::new(),
            validation: None,
        }
    }

    /// Written and, if validated, compliant.
    pub fn is_ok(&self) -> bool {
        self.success && self.validation.as_ref().map_or(true, |v| v.is_valid)
    }
}

/// Runs the resume pipeline for single files, multiple formats and batches.
///
/// # Example
///
/// ```no_run
/// use resume_export::export::ResumeExporter;
///
/// let exporter = ResumeExporter::new();
/// let result = exporter.export("Resume.md", "out/Resume.docx", true);
/// for error in &result.errors {
///     eprintln!("{}", error);
/// }
/// ```
pub struct ResumeExporter {
    parse_options: ParseOptions,
    style: StyleConfig,
    validator: AtsValidator,
    registry: ExporterRegistry,
}

impl ResumeExporter {
    /// Create an exporter with default style, rules and exporters.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            style: StyleConfig::default(),
            validator: AtsValidator::default(),
            registry: ExporterRegistry::with_defaults(),
        }
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set the rendering style.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Set the validator rules.
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.validator = AtsValidator::new(rules);
        self
    }

    /// Replace the exporter registry.
    pub fn with_registry(mut self, registry: ExporterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the exporter registry.
    pub fn registry(&self) -> &ExporterRegistry {
        &self.registry
    }

    /// Export one resume. The output format follows the output file's
    /// extension (DOCX when it has none). Validation only applies to DOCX
    /// output.
    pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        validate: bool,
    ) -> ExportResult {
        let input = input.as_ref();
        let output = output.as_ref();
        let mut result = ExportResult::new(input, output);

        if let Err(err) = self.write_output(input, output) {
            let message = match err {
                Error::SourceNotFound(path) => format!("File not found: {}", path.display()),
                other => format!("Export failed: {}", other),
            };
            warn!("{}", message);
            result.errors.push(message);
            return result;
        }
        info!("Created: {}", output.display());
        result.success = true;

        if validate && extension_of(output) == "docx" {
            info!("Validating ATS compliance...");
            let report = self.validator.validate_path(output);
            result.errors.extend(report.errors());
            result.warnings.extend(report.warnings());
            if report.is_valid {
                info!("ATS validation passed");
            } else {
                warn!("ATS validation found issues in {}", output.display());
            }
            result.validation = Some(report);
        }

        result
    }

    fn write_output(&self, input: &Path, output: &Path) -> Result<()> {
        info!("Parsing resume: {}", input.display());
        let parser = ResumeParser::open_with_options(input, self.parse_options.clone())?;
        let resume = parser.parse();
        debug!(
            "Parsed {} job(s), {} skill(s), {} other section(s)",
            resume.experience.len(),
            resume.skill_count(),
            resume.other_sections.len()
        );

        let mut doc = render(&resume, &self.style);
        doc.properties.created = Some(Utc::now());
        self.registry
            .export(&extension_of(output), &resume, &doc, output)
    }

    /// Export one resume to several formats in `out_dir`, each named after
    /// the input's file stem. Results are keyed by format, in request order.
    pub fn export_multi_format<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        out_dir: Q,
        formats: &[&str],
    ) -> IndexMap<String, ExportResult> {
        let input = input.as_ref();
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());

        let mut results = IndexMap::new();
        for format in formats {
            let format = format.to_lowercase();
            if results.contains_key(&format) {
                continue;
            }
            let output = out_dir.as_ref().join(format!("{}.{}", stem, format));
            results.insert(format, self.export(input, output, false));
        }
        results
    }

    /// Export every resume source under `dir` to DOCX next to its source.
    ///
    /// Files are exported in parallel; results follow the sorted order of
    /// [`find_resume_files`].
    pub fn export_batch<P: AsRef<Path>>(&self, dir: P, validate: bool) -> Result<Vec<ExportResult>> {
        let files = find_resume_files(dir)?;
        info!("Found {} resume file(s)", files.len());

        let results: Vec<ExportResult> = files
            .par_iter()
            .map(|file| self.export(file, file.with_extension("docx"), validate))
            .collect();

        let succeeded = results.iter().filter(|r| r.success).count();
        info!("Completed: {}/{} successful", succeeded, results.len());
        Ok(results)
    }
}

impl Default for ResumeExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Find `*.md` files under `dir` (recursively) whose file name contains
/// `Resume` or `resume`, sorted by path.
pub fn find_resume_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::SourceNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_markdown(dir, &mut files)?;
    files.retain(|path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.contains("Resume") || name.contains("resume"))
    });
    files.sort();
    Ok(files)
}

fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_markdown(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "docx".to_string())
}
