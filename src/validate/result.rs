//! Validation results and the textual report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of the report banner.
const BANNER_WIDTH: usize = 70;

/// How much a failed check matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Makes the document non-compliant when failed
    Critical,
    /// Should be fixed
    Warning,
    /// Suggestion only
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub check_name: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    /// A passed check. Passed checks are always informational.
    pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            passed: true,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// A failed check with the given severity.
    pub fn fail(
        check_name: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            passed: false,
            message: message.into(),
            severity,
        }
    }

    /// Check if this is a failed critical check.
    pub fn is_critical_failure(&self) -> bool {
        !self.passed && self.severity == Severity::Critical
    }

    /// Status glyph shown in the report.
    pub fn glyph(&self) -> &'static str {
        if self.passed {
            "✅"
        } else if self.severity == Severity::Critical {
            "❌"
        } else {
            "⚠️"
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.glyph(), self.check_name, self.message)
    }
}

/// Ordered check results plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` when no critical check failed
    pub is_valid: bool,

    /// Results in check order
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Build a report, deriving validity from the results.
    pub fn new(results: Vec<ValidationResult>) -> Self {
        let is_valid = !results.iter().any(ValidationResult::is_critical_failure);
        Self { is_valid, results }
    }

    /// Failed checks of the given severity.
    pub fn failures(&self, severity: Severity) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(move |r| !r.passed && r.severity == severity)
    }

    /// Checks that passed.
    pub fn passed(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.passed)
    }

    /// Messages of failed critical checks.
    pub fn errors(&self) -> Vec<String> {
        self.failures(Severity::Critical)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Messages of failed warning and info checks.
    pub fn warnings(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| !r.passed && r.severity != Severity::Critical)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Human-readable report grouped into critical, warning, suggestion and
    /// passed sections.
    pub fn to_report_string(&self) -> String {
        let rule = "=".repeat(BANNER_WIDTH);
        let mut lines = vec![
            format!("\n{}", rule),
            "ATS COMPLIANCE VALIDATION REPORT".to_string(),
            format!("{}\n", rule),
        ];

        let critical: Vec<_> = self.failures(Severity::Critical).collect();
        if critical.is_empty() {
            lines.push("✅ OVERALL STATUS: ATS-COMPLIANT".to_string());
        } else {
            lines.push("❌ OVERALL STATUS: NOT ATS-COMPLIANT".to_string());
        }
        lines.push(String::new());

        let groups = [
            ("🚨 CRITICAL ISSUES (Must Fix):", critical),
            (
                "⚠️  WARNINGS (Should Fix):",
                self.failures(Severity::Warning).collect(),
            ),
            ("ℹ️  SUGGESTIONS:", self.failures(Severity::Info).collect()),
        ];
        for (title, results) in groups {
            if results.is_empty() {
                continue;
            }
            lines.push(title.to_string());
            lines.extend(results.iter().map(|r| format!("  {}", r)));
            lines.push(String::new());
        }

        lines.push("✅ PASSED CHECKS:".to_string());
        lines.extend(self.passed().map(|r| format!("  {}", r)));
        lines.push(format!("\n{}", rule));

        lines.join("\n")
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_report_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_display() {
        let pass = ValidationResult::pass("Tables", "No tables found (good for ATS)");
        assert_eq!(pass.to_string(), "✅ Tables: No tables found (good for ATS)");

        let critical = ValidationResult::fail("Images", "1 image", Severity::Critical);
        assert!(critical.to_string().starts_with("❌"));

        let warning = ValidationResult::fail("Fonts", "Comic Sans", Severity::Warning);
        assert!(warning.to_string().starts_with("⚠️"));
    }

    #[test]
    fn test_validity_ignores_non_critical() {
        let report = ValidationReport::new(vec![
            ValidationResult::pass("Tables", "ok"),
            ValidationResult::fail("Fonts", "bad font", Severity::Warning),
            ValidationResult::fail("Line Length", "long", Severity::Info),
        ]);
        assert!(report.is_valid);
        assert!(report.errors().is_empty());
        assert_eq!(report.warnings(), vec!["bad font", "long"]);

        let report = ValidationReport::new(vec![ValidationResult::fail(
            "Tables",
            "1 table",
            Severity::Critical,
        )]);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_report_grouping() {
        let report = ValidationReport::new(vec![
            ValidationResult::pass("File Size", "small"),
            ValidationResult::fail("Fonts", "bad font", Severity::Warning),
            ValidationResult::fail("Tables", "1 table", Severity::Critical),
        ]);
        let text = report.to_report_string();

        assert!(text.contains("❌ OVERALL STATUS: NOT ATS-COMPLIANT"));
        let critical = text.find("🚨 CRITICAL ISSUES").unwrap();
        let warnings = text.find("WARNINGS (Should Fix)").unwrap();
        let passed = text.find("✅ PASSED CHECKS:").unwrap();
        assert!(critical < warnings && warnings < passed);
        assert!(!text.contains("SUGGESTIONS"));
        assert!(text.contains("  ❌ Tables: 1 table"));
        assert!(text.ends_with(&"=".repeat(70)));
    }

    #[test]
    fn test_compliant_report() {
        let report = ValidationReport::new(vec![ValidationResult::pass("Tables", "none")]);
        assert!(report.to_string().contains("✅ OVERALL STATUS: ATS-COMPLIANT"));
    }
}
