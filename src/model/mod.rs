//! Data model types.
//!
//! [`Resume`] is the structured record produced by the parser.
//! [`RenderedDocument`] is the ordered list of styled blocks produced by the
//! renderer; it is format-agnostic and is serialized to DOCX by
//! [`crate::render::DocxWriter`].

mod document;
mod paragraph;
mod resume;

pub use document::{Block, DocumentProperties, PageSetup, RenderedDocument, POINTS_PER_INCH};
pub use paragraph::{Alignment, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use resume::{ContactInfo, EducationEntry, JobEntry, Resume, SectionKind, DEFAULT_NAME};
