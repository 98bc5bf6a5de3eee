//! Reading the inspectable surface of a DOCX artifact.

use std::collections::BTreeSet;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::RenderedDocument;
use crate::render::docx::part_names;

/// What the compliance checks look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSurface {
    /// Size of the artifact in bytes
    pub size_bytes: u64,

    /// Text of each top-level body paragraph, in order (empty ones included)
    pub paragraphs: Vec<String>,

    /// Distinct font families set on runs of those paragraphs
    pub fonts: BTreeSet<String>,

    /// Number of top-level tables
    pub table_count: usize,

    /// Number of document relationships pointing at images
    pub image_count: usize,
}

impl ArtifactSurface {
    /// Surface of an in-memory rendered document, as it would be written.
    ///
    /// Rendered documents never contain tables or images.
    pub fn from_rendered(doc: &RenderedDocument, size_bytes: u64) -> Self {
        Self {
            size_bytes,
            paragraphs: doc.paragraph_texts(),
            fonts: doc.fonts_used(),
            table_count: 0,
            image_count: 0,
        }
    }

    /// Size in megabytes (1 MB = 1024 * 1024 bytes).
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Trimmed texts of the non-empty paragraphs.
    pub fn non_empty_paragraphs(&self) -> impl Iterator<Item = &str> {
        self.paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }

    /// Number of blank paragraphs.
    pub fn empty_paragraph_count(&self) -> usize {
        self.paragraphs.iter().filter(|p| p.trim().is_empty()).count()
    }
}

/// Opens DOCX packages and extracts their [`ArtifactSurface`].
pub struct ArtifactInspector;

impl ArtifactInspector {
    /// Inspect a DOCX file.
    pub fn inspect_path<P: AsRef<Path>>(path: P) -> Result<ArtifactSurface> {
        let path = path.as_ref();
        let size_bytes = std::fs::metadata(path)?.len();
        let file = std::fs::File::open(path)?;
        Self::inspect_reader(file, size_bytes)
    }

    /// Inspect DOCX bytes.
    pub fn inspect_bytes(data: &[u8]) -> Result<ArtifactSurface> {
        Self::inspect_reader(Cursor::new(data), data.len() as u64)
    }

    fn inspect_reader<R: Read + Seek>(reader: R, size_bytes: u64) -> Result<ArtifactSurface> {
        let mut archive = ZipArchive::new(reader).map_err(invalid)?;

        let document = read_part(&mut archive, part_names::DOCUMENT)?
            .ok_or_else(|| Error::InvalidArtifact(format!("missing {}", part_names::DOCUMENT)))?;
        let body = BodyScan::scan(&document).map_err(invalid)?;

        let image_count = match read_part(&mut archive, part_names::DOCUMENT_RELS)? {
            Some(rels) => count_image_relationships(&rels).map_err(invalid)?,
            None => 0,
        };

        Ok(ArtifactSurface {
            size_bytes,
            paragraphs: body.paragraphs,
            fonts: body.fonts,
            table_count: body.table_count,
            image_count,
        })
    }
}

fn invalid(err: impl std::fmt::Display) -> Error {
    Error::InvalidArtifact(err.to_string())
}

/// Read a part as UTF-8; `None` when the part is absent.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(invalid(e)),
    };
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(invalid)?;
    Ok(Some(content))
}

/// Check an element name against a local name, ignoring the prefix.
fn is_element(name: &[u8], local: &[u8]) -> bool {
    match name.iter().rposition(|b| *b == b':') {
        Some(i) => &name[i + 1..] == local,
        None => name == local,
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// State while walking `word/document.xml`.
#[derive(Default)]
struct BodyScan {
    paragraphs: Vec<String>,
    fonts: BTreeSet<String>,
    table_count: usize,
    table_depth: usize,
    paragraph_depth: usize,
    run_depth: usize,
    in_text: bool,
    current: Option<String>,
}

impl BodyScan {
    fn scan(xml: &str) -> Result<Self> {
        let mut scan = Self::default();
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => scan.start(e),
                Event::Empty(ref e) => scan.empty(e),
                Event::End(ref e) => scan.end(e.name().as_ref()),
                Event::Text(ref e) if scan.in_text => {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    scan.push_text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(scan)
    }

    /// Inside a body-level paragraph (not in a table cell).
    fn in_body_paragraph(&self) -> bool {
        self.current.is_some()
    }

    fn start(&mut self, e: &BytesStart) {
        let name = e.name();
        let name = name.as_ref();

        if is_element(name, b"tbl") {
            if self.table_depth == 0 && self.paragraph_depth == 0 {
                self.table_count += 1;
            }
            self.table_depth += 1;
        } else if is_element(name, b"p") {
            if self.paragraph_depth == 0 && self.table_depth == 0 {
                self.current = Some(String::new());
            }
            self.paragraph_depth += 1;
        } else if is_element(name, b"r") {
            self.run_depth += 1;
        } else if is_element(name, b"t") {
            self.in_text = true;
        } else {
            self.inline(e);
        }
    }

    fn empty(&mut self, e: &BytesStart) {
        let name = e.name();
        if is_element(name.as_ref(), b"p") {
            if self.paragraph_depth == 0 && self.table_depth == 0 {
                self.paragraphs.push(String::new());
            }
        } else {
            self.inline(e);
        }
    }

    /// Breaks, tabs and run fonts.
    fn inline(&mut self, e: &BytesStart) {
        if !self.in_body_paragraph() {
            return;
        }
        let name = e.name();
        let name = name.as_ref();

        if is_element(name, b"tab") && self.run_depth > 0 {
            self.push_text("\t");
        } else if (is_element(name, b"br") || is_element(name, b"cr")) && self.run_depth > 0 {
            self.push_text("\n");
        } else if is_element(name, b"rFonts") && self.run_depth > 0 {
            if let Some(font) = attribute(e, b"w:ascii").filter(|f| !f.is_empty()) {
                self.fonts.insert(font);
            }
        }
    }

    fn end(&mut self, name: &[u8]) {
        if is_element(name, b"tbl") {
            self.table_depth = self.table_depth.saturating_sub(1);
        } else if is_element(name, b"p") {
            self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
            if self.paragraph_depth == 0 {
                if let Some(text) = self.current.take() {
                    self.paragraphs.push(text);
                }
            }
        } else if is_element(name, b"r") {
            self.run_depth = self.run_depth.saturating_sub(1);
        } else if is_element(name, b"t") {
            self.in_text = false;
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(current) = self.current.as_mut() {
            current.push_str(text);
        }
    }
}

/// Count relationships whose target mentions an image.
fn count_image_relationships(xml: &str) -> Result<usize> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if is_element(e.name().as_ref(), b"Relationship") =>
            {
                let target = attribute(e, b"Target").unwrap_or_default();
                if target.to_lowercase().contains("image") {
                    count += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:pPr><w:rPr><w:rFonts w:ascii="Wingdings"/></w:rPr></w:pPr><w:r><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/><w:b/></w:rPr><w:t>R&amp;D</w:t><w:tab/><w:t xml:space="preserve"> Lead</w:t></w:r></w:p>
<w:p/>
<w:tbl><w:tr><w:tc><w:p><w:r><w:rPr><w:rFonts w:ascii="Papyrus"/></w:rPr><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p><w:r><w:rPr><w:rFonts w:ascii="Comic Sans MS"/></w:rPr><w:t>line one</w:t><w:br/><w:t>line two</w:t></w:r></w:p>
<w:sectPr/>
</w:body>
</w:document>"#;

    #[test]
    fn test_body_scan() {
        let scan = BodyScan::scan(DOCUMENT).unwrap();

        assert_eq!(scan.paragraphs, vec!["R&D\t Lead", "", "line one\nline two"]);
        assert_eq!(scan.table_count, 1);
        let fonts: Vec<&str> = scan.fonts.iter().map(String::as_str).collect();
        assert_eq!(fonts, vec!["Calibri", "Comic Sans MS"]);
    }

    #[test]
    fn test_image_relationships() {
        let rels = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://x/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://x/image" Target="media/Image1.png"/>
<Relationship Id="rId3" Type="http://x/image" Target="media/image2.jpeg"/>
</Relationships>"#;
        assert_eq!(count_image_relationships(rels).unwrap(), 2);
    }

    #[test]
    fn test_not_a_zip() {
        let result = ArtifactInspector::inspect_bytes(b"plain text, not a package");
        assert!(matches!(result, Err(Error::InvalidArtifact(_))));
    }

    #[test]
    fn test_is_element() {
        assert!(is_element(b"w:p", b"p"));
        assert!(is_element(b"p", b"p"));
        assert!(!is_element(b"w:pPr", b"p"));
    }

    #[test]
    fn test_surface_counts() {
        let surface = ArtifactSurface {
            size_bytes: 512 * 1024,
            paragraphs: vec!["A".into(), " ".into(), "".into(), "B".into()],
            ..Default::default()
        };
        assert_eq!(surface.size_mb(), 0.5);
        assert_eq!(surface.empty_paragraph_count(), 2);
        assert_eq!(surface.non_empty_paragraphs().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
