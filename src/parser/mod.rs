//! Markdown resume parsing module.
//!
//! The source format is a fixed convention: one `# ` heading for the name,
//! `## ` headings for sections, `### ` headings or bold lines for
//! sub-entries, `- ` bullets, `*italic*` dates and `|` field separators.

mod contact;
mod line;
mod options;
mod resume_parser;
mod sections;

pub use contact::ContactExtractor;
pub use options::ParseOptions;
pub use resume_parser::ResumeParser;
pub use sections::DEFAULT_SKILL_CATEGORY;
