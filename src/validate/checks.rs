//! The fixed compliance checks.
//!
//! Each check reads an [`ArtifactSurface`] and returns its results. The order
//! of [`CHECKS`] is the order results appear in a report.

use super::inspect::ArtifactSurface;
use super::result::{Severity, ValidationResult};
use super::rules::RuleConfig;

/// Largest accepted artifact, in megabytes.
pub const MAX_FILE_SIZE_MB: f64 = 1.0;

/// Font families ATS parsers handle reliably.
pub const ATS_FRIENDLY_FONTS: [&str; 5] =
    ["Calibri", "Arial", "Times New Roman", "Georgia", "Helvetica"];

/// Acceptable page-count estimate.
pub const MIN_PAGES: usize = 1;
pub const MAX_PAGES: usize = 2;

/// Non-empty paragraphs assumed to fit on one page.
pub const PARAGRAPHS_PER_PAGE: usize = 30;

/// More empty paragraphs than this is flagged.
pub const MAX_EMPTY_PARAGRAPHS: usize = 10;

/// Paragraphs longer than this many characters count as long.
pub const LONG_LINE_CHARS: usize = 150;

/// More long paragraphs than this is flagged.
pub const MAX_LONG_LINES: usize = 5;

/// A check over the artifact surface.
pub type CheckFn = fn(&ArtifactSurface, &RuleConfig) -> Vec<ValidationResult>;

/// All checks, in report order.
pub const CHECKS: [CheckFn; 7] = [
    check_file_size,
    check_fonts,
    check_tables,
    check_images,
    check_sections,
    check_length,
    check_formatting,
];

/// Run every check in order.
pub fn run_all(surface: &ArtifactSurface, rules: &RuleConfig) -> Vec<ValidationResult> {
    CHECKS.iter().flat_map(|check| check(surface, rules)).collect()
}

pub fn check_file_size(surface: &ArtifactSurface, _rules: &RuleConfig) -> Vec<ValidationResult> {
    let size_mb = surface.size_mb();
    let result = if size_mb <= MAX_FILE_SIZE_MB {
        ValidationResult::pass(
            "File Size",
            format!(
                "File size: {:.2}MB (under {:.1}MB limit)",
                size_mb, MAX_FILE_SIZE_MB
            ),
        )
    } else {
        ValidationResult::fail(
            "File Size",
            format!(
                "File size ({:.2}MB) exceeds {:.1}MB limit",
                size_mb, MAX_FILE_SIZE_MB
            ),
            Severity::Critical,
        )
    };
    vec![result]
}

pub fn check_fonts(surface: &ArtifactSurface, _rules: &RuleConfig) -> Vec<ValidationResult> {
    let offending: Vec<&str> = surface
        .fonts
        .iter()
        .map(String::as_str)
        .filter(|font| !ATS_FRIENDLY_FONTS.contains(font))
        .collect();

    let result = if offending.is_empty() {
        ValidationResult::pass("Fonts", "All fonts are ATS-friendly")
    } else {
        ValidationResult::fail(
            "Fonts",
            format!(
                "Non-ATS fonts detected: {}. Use {}",
                offending.join(", "),
                ATS_FRIENDLY_FONTS.join(", ")
            ),
            Severity::Warning,
        )
    };
    vec![result]
}

pub fn check_tables(surface: &ArtifactSurface, _rules: &RuleConfig) -> Vec<ValidationResult> {
    let result = if surface.table_count == 0 {
        ValidationResult::pass("Tables", "No tables found (good for ATS)")
    } else {
        ValidationResult::fail(
            "Tables",
            format!(
                "Document contains {} table(s). ATS systems may not parse tables correctly.",
                surface.table_count
            ),
            Severity::Critical,
        )
    };
    vec![result]
}

pub fn check_images(surface: &ArtifactSurface, _rules: &RuleConfig) -> Vec<ValidationResult> {
    let result = if surface.image_count == 0 {
        ValidationResult::pass("Images", "No images found (good for ATS)")
    } else {
        ValidationResult::fail(
            "Images",
            format!(
                "Document contains {} image(s). ATS systems cannot parse images.",
                surface.image_count
            ),
            Severity::Critical,
        )
    };
    vec![result]
}

pub fn check_sections(surface: &ArtifactSurface, rules: &RuleConfig) -> Vec<ValidationResult> {
    let texts: Vec<String> = surface
        .non_empty_paragraphs()
        .map(str::to_lowercase)
        .collect();

    let mut found: Vec<&str> = Vec::new();
    for section in &rules.standard_sections {
        let needle = section.to_lowercase();
        if !found.contains(&section.as_str()) && texts.iter().any(|t| t.contains(&needle)) {
            found.push(section);
        }
    }

    let has = |label: &str| found.iter().any(|s| s.to_lowercase().contains(label));
    let has_experience = has("experience");
    let has_education = has("education");

    let result = if has_experience && has_education {
        ValidationResult::pass(
            "Sections",
            format!("Found standard sections: {}", found.join(", ")),
        )
    } else {
        let mut missing = Vec::new();
        if !has_experience {
            missing.push("Experience");
        }
        if !has_education {
            missing.push("Education");
        }
        ValidationResult::fail(
            "Sections",
            format!("Missing standard sections: {}", missing.join(", ")),
            Severity::Warning,
        )
    };
    vec![result]
}

/// Rough page count from the number of non-empty paragraphs.
pub fn estimate_pages(surface: &ArtifactSurface) -> usize {
    (surface.non_empty_paragraphs().count() / PARAGRAPHS_PER_PAGE).max(1)
}

pub fn check_length(surface: &ArtifactSurface, _rules: &RuleConfig) -> Vec<ValidationResult> {
    let pages = estimate_pages(surface);
    let result = if (MIN_PAGES..=MAX_PAGES).contains(&pages) {
        ValidationResult::pass(
            "Length",
            format!("Resume length: ~{} page(s) (optimal)", pages),
        )
    } else if pages < MIN_PAGES {
        ValidationResult::fail(
            "Length",
            format!(
                "Resume may be too short (~{} page). Consider adding more detail.",
                pages
            ),
            Severity::Info,
        )
    } else {
        ValidationResult::fail(
            "Length",
            format!(
                "Resume may be too long (~{} pages). Consider condensing to {} pages.",
                pages, MAX_PAGES
            ),
            Severity::Warning,
        )
    };
    vec![result]
}

/// Spacing, plus a line-length result only when long paragraphs are common.
pub fn check_formatting(surface: &ArtifactSurface, _rules: &RuleConfig) -> Vec<ValidationResult> {
    let mut results = Vec::with_capacity(2);

    let empty = surface.empty_paragraph_count();
    if empty > MAX_EMPTY_PARAGRAPHS {
        results.push(ValidationResult::fail(
            "Spacing",
            format!(
                "Excessive empty paragraphs ({}). Clean up spacing for ATS.",
                empty
            ),
            Severity::Warning,
        ));
    } else {
        results.push(ValidationResult::pass("Spacing", "Spacing looks good"));
    }

    let long_lines = surface
        .paragraphs
        .iter()
        .filter(|p| p.chars().count() > LONG_LINE_CHARS)
        .count();
    if long_lines > MAX_LONG_LINES {
        results.push(ValidationResult::fail(
            "Line Length",
            format!(
                "{} paragraphs have very long lines. Consider breaking them up.",
                long_lines
            ),
            Severity::Info,
        ));
    }

    results
}
