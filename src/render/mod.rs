//! Rendering module: resume to styled blocks, and blocks to output formats.

mod builder;
pub mod docx;
mod json;
mod style;
mod text;

pub use builder::{render, DocumentBuilder, BULLET_INDENT};
pub use docx::{to_docx_bytes, write_docx, DocxWriter};
pub use json::{to_json, JsonFormat};
pub use style::{FontSpec, Fonts, Margins, Spacing, StyleConfig};
pub use text::to_text;
