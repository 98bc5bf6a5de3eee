//! Output exporters and the end-to-end export pipeline.
//!
//! Each output format is an [`Exporter`] registered in an
//! [`ExporterRegistry`] under its file extension. [`ResumeExporter`] drives
//! parse, render, write and the optional compliance check.
//!
//! # Example
//!
//! ```no_run
//! use resume_export::export::ExporterRegistry;
//! use resume_export::{parse_file, render, StyleConfig};
//!
//! fn main() -> resume_export::Result<()> {
//!     let resume = parse_file("Resume.md")?;
//!     let doc = render(&resume, &StyleConfig::default());
//!
//!     let registry = ExporterRegistry::with_defaults();
//!     registry.export("txt", &resume, &doc, "Resume.txt".as_ref())?;
//!     Ok(())
//! }
//! ```

mod formats;
mod pipeline;

pub use formats::{DocxExporter, JsonExporter, TextExporter};
pub use pipeline::{find_resume_files, ExportResult, ResumeExporter};

use crate::error::{Error, Result};
use crate::model::{RenderedDocument, Resume};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for output exporters.
///
/// Implement this trait to add another output format.
pub trait Exporter: Send + Sync {
    /// File extension this exporter writes, lowercase without the dot.
    fn extension(&self) -> &str;

    /// Name of this exporter.
    fn name(&self) -> &str;

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Produce the output bytes.
    fn export_bytes(&self, resume: &Resume, doc: &RenderedDocument) -> Result<Vec<u8>>;

    /// Write the output to a file, creating parent directories.
    fn export(&self, resume: &Resume, doc: &RenderedDocument, path: &Path) -> Result<()> {
        let bytes = self.export_bytes(resume, doc)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Registry of exporters keyed by extension and by name.
pub struct ExporterRegistry {
    exporters: HashMap<String, Arc<dyn Exporter>>,
    by_name: HashMap<String, Arc<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the DOCX, text and JSON exporters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxExporter::new()));
        registry.register(Arc::new(TextExporter::new()));
        registry.register(Arc::new(JsonExporter::new()));
        registry
    }

    /// Register an exporter, replacing any exporter for the same extension.
    pub fn register(&mut self, exporter: Arc<dyn Exporter>) {
        self.exporters
            .insert(exporter.extension().to_lowercase(), exporter.clone());
        self.by_name.insert(exporter.name().to_lowercase(), exporter);
    }

    /// Get an exporter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn Exporter>> {
        self.exporters.get(&ext.to_lowercase()).cloned()
    }

    /// Get an exporter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Exporter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.exporters.contains_key(&ext.to_lowercase())
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.exporters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Export with the exporter registered for `ext`.
    pub fn export(
        &self,
        ext: &str,
        resume: &Resume,
        doc: &RenderedDocument,
        path: &Path,
    ) -> Result<()> {
        let exporter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;
        exporter.export(resume, doc, path)
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExporterRegistry::with_defaults();
        assert!(registry.supports("docx"));
        assert!(registry.supports("TXT"));
        assert!(registry.supports("json"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.supported_extensions(), vec!["docx", "json", "txt"]);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ExporterRegistry::with_defaults();
        assert_eq!(registry.get_by_extension("txt").unwrap().name(), "text");
        assert_eq!(registry.get_by_name("TEXT").unwrap().extension(), "txt");
        assert!(registry.get_by_name("pdf").is_none());
    }

    #[test]
    fn test_unsupported_format() {
        let registry = ExporterRegistry::new();
        let result = registry.export(
            "html",
            &Resume::new(),
            &RenderedDocument::new(),
            Path::new("out.html"),
        );
        assert!(matches!(result, Err(Error::UnsupportedFormat(ext)) if ext == "html"));
    }
}
