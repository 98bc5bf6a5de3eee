//! DOCX package writer.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::document_xml::DocumentXmlWriter;
use super::{part_names, parts};
use crate::error::Result;
use crate::model::{Block, RenderedDocument, TextStyle};

/// Writes a [`RenderedDocument`] as a DOCX package.
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer.
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Write every part and finish the archive, returning the inner writer.
    pub fn write(mut self, doc: &RenderedDocument) -> Result<W> {
        let document_xml = DocumentXmlWriter::new().write(&doc.blocks, &doc.page);

        self.write_part(part_names::CONTENT_TYPES, &parts::content_types_xml())?;
        self.write_part(part_names::ROOT_RELS, &parts::root_rels_xml())?;
        self.write_part(part_names::DOCUMENT, &document_xml)?;
        self.write_part(part_names::DOCUMENT_RELS, &parts::document_rels_xml())?;
        self.write_part(part_names::STYLES, &parts::styles_xml(&body_style(doc)))?;
        self.write_part(part_names::NUMBERING, &parts::numbering_xml())?;
        self.write_part(part_names::SETTINGS, &parts::settings_xml())?;
        self.write_part(part_names::CORE, &parts::core_xml(&doc.properties))?;

        Ok(self.zip.finish()?)
    }

    fn write_part(&mut self, name: &str, content: &str) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(name, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Style of the first plain paragraph run, used for the document defaults.
fn body_style(doc: &RenderedDocument) -> TextStyle {
    doc.blocks
        .iter()
        .skip(1)
        .find_map(|block| match block {
            Block::Paragraph(p) => p.runs.iter().find(|r| !r.style.bold && !r.style.italic),
            _ => None,
        })
        .map(|run| run.style.clone())
        .unwrap_or_default()
}

/// Serialize a rendered document to DOCX bytes.
pub fn to_docx_bytes(doc: &RenderedDocument) -> Result<Vec<u8>> {
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(doc)?;
    Ok(cursor.into_inner())
}

/// Serialize a rendered document to a DOCX file, creating parent directories.
pub fn write_docx<P: AsRef<Path>>(doc: &RenderedDocument, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    let mut file = DocxWriter::new(file).write(doc)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::is_docx_bytes;
    use crate::model::{Paragraph, TextRun};
    use std::io::Read;
    use zip::ZipArchive;

    fn sample() -> RenderedDocument {
        let mut doc = RenderedDocument::new();
        doc.add_block(Block::Paragraph(Paragraph::with_run(TextRun::new(
            "JANE DOE",
            TextStyle::new("Calibri", 16.0).bold(true),
        ))));
        doc.add_block(Block::Paragraph(Paragraph::with_run(TextRun::new(
            "NYC",
            TextStyle::new("Arial", 10.0),
        ))));
        doc
    }

    #[test]
    fn test_package_parts() {
        let bytes = to_docx_bytes(&sample()).unwrap();
        assert!(is_docx_bytes(&bytes));

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for name in [
            part_names::CONTENT_TYPES,
            part_names::ROOT_RELS,
            part_names::DOCUMENT,
            part_names::DOCUMENT_RELS,
            part_names::STYLES,
            part_names::NUMBERING,
            part_names::SETTINGS,
            part_names::CORE,
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }

        let mut document = String::new();
        archive
            .by_name(part_names::DOCUMENT)
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("JANE DOE"));
    }

    #[test]
    fn test_body_style_skips_name() {
        let style = body_style(&sample());
        assert_eq!(style.font_name, "Arial");
        assert_eq!(style.font_size, 10.0);
        assert_eq!(body_style(&RenderedDocument::new()), TextStyle::default());
    }

    #[test]
    fn test_write_docx_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("resume.docx");
        write_docx(&sample(), &path).unwrap();
        assert!(path.exists());
    }
}
