//! ATS compliance validation of rendered DOCX artifacts.
//!
//! The [`ArtifactInspector`] reads what an ATS would see (paragraph text,
//! run fonts, tables, images) and [`AtsValidator`] runs the fixed checks in
//! [`checks::CHECKS`] over it.

pub mod checks;
mod inspect;
mod result;
mod rules;
mod validator;

pub use inspect::{ArtifactInspector, ArtifactSurface};
pub use result::{Severity, ValidationReport, ValidationResult};
pub use rules::{RuleConfig, DEFAULT_STANDARD_SECTIONS};
pub use validator::AtsValidator;
