//! The compliance validator.

use std::path::Path;

use super::checks;
use super::inspect::{ArtifactInspector, ArtifactSurface};
use super::result::{Severity, ValidationReport, ValidationResult};
use super::rules::RuleConfig;
use crate::error::Error;

/// Checks rendered DOCX artifacts against the ATS rule set.
///
/// # Example
///
/// ```no_run
/// use resume_export::validate::AtsValidator;
///
/// let report = AtsValidator::default().validate_path("Resume.docx");
/// println!("{}", report);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AtsValidator {
    rules: RuleConfig,
}

impl AtsValidator {
    /// Create a validator with the given rules.
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    /// Rules in use.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Validate a DOCX file.
    ///
    /// A missing or unreadable file yields a report with a single critical
    /// result; no other checks run.
    pub fn validate_path<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        let path = path.as_ref();
        if !path.is_file() {
            return ValidationReport::new(vec![ValidationResult::fail(
                "File Existence",
                format!("File not found: {}", path.display()),
                Severity::Critical,
            )]);
        }

        match ArtifactInspector::inspect_path(path) {
            Ok(surface) => self.validate_surface(&surface),
            Err(err) => unreadable(err),
        }
    }

    /// Validate DOCX bytes.
    pub fn validate_bytes(&self, data: &[u8]) -> ValidationReport {
        match ArtifactInspector::inspect_bytes(data) {
            Ok(surface) => self.validate_surface(&surface),
            Err(err) => unreadable(err),
        }
    }

    /// Run every check over an already inspected surface.
    pub fn validate_surface(&self, surface: &ArtifactSurface) -> ValidationReport {
        ValidationReport::new(checks::run_all(surface, &self.rules))
    }
}

fn unreadable(err: Error) -> ValidationReport {
    let message = match err {
        err @ Error::InvalidArtifact(_) => err.to_string(),
        other => Error::InvalidArtifact(other.to_string()).to_string(),
    };
    ValidationReport::new(vec![ValidationResult::fail(
        "File Format",
        message,
        Severity::Critical,
    )])
}
