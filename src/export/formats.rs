//! Built-in exporters.

use crate::error::Result;
use crate::model::{RenderedDocument, Resume};
use crate::render::{to_docx_bytes, to_json, to_text, JsonFormat};

use super::Exporter;

/// Writes the rendered document as a DOCX package.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    _private: (),
}

impl DocxExporter {
    /// Create a new DOCX exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Exporter for DocxExporter {
    fn extension(&self) -> &str {
        "docx"
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn mime_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn export_bytes(&self, _resume: &Resume, doc: &RenderedDocument) -> Result<Vec<u8>> {
        to_docx_bytes(doc)
    }
}

/// Writes the plain-text projection of the rendered document.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    _private: (),
}

impl TextExporter {
    /// Create a new text exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Exporter for TextExporter {
    fn extension(&self) -> &str {
        "txt"
    }

    fn name(&self) -> &str {
        "text"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn export_bytes(&self, _resume: &Resume, doc: &RenderedDocument) -> Result<Vec<u8>> {
        let mut text = to_text(doc);
        text.push('\n');
        Ok(text.into_bytes())
    }
}

/// Writes the parsed resume as pretty JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    _private: (),
}

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Exporter for JsonExporter {
    fn extension(&self) -> &str {
        "json"
    }

    fn name(&self) -> &str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn export_bytes(&self, resume: &Resume, _doc: &RenderedDocument) -> Result<Vec<u8>> {
        Ok(to_json(resume, JsonFormat::Pretty)?.into_bytes())
    }
}
