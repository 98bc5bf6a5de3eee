//! `word/document.xml` generation.

use crate::model::{Alignment, Block, PageSetup, Paragraph, ParagraphStyle, TextRun, TextStyle};

use super::{escape_xml, namespaces, twips, BULLET_NUM_ID};

/// Paragraph style id of bulleted paragraphs, defined in `styles.xml`.
pub(crate) const LIST_BULLET_STYLE: &str = "ListBullet";

/// Serializes rendered blocks as WordprocessingML.
#[derive(Debug, Default)]
pub struct DocumentXmlWriter {
    xml: String,
}

impl DocumentXmlWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the full `document.xml` content.
    pub fn write(mut self, blocks: &[Block], page: &PageSetup) -> String {
        self.xml
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.xml.push('\n');
        self.xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));
        self.xml.push_str("<w:body>");

        for block in blocks {
            self.write_block(block);
        }

        self.write_section_properties(page);
        self.xml.push_str("</w:body></w:document>");
        self.xml
    }

    fn write_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) | Block::SectionHeader(p) => self.write_paragraph(p, false),
            Block::BulletItem(p) => self.write_paragraph(p, true),
            Block::Spacer { space_after } => {
                self.xml.push_str(&format!(
                    r#"<w:p><w:pPr><w:spacing w:after="{}"/></w:pPr></w:p>"#,
                    twips(*space_after)
                ));
            }
        }
    }

    fn write_paragraph(&mut self, para: &Paragraph, bullet: bool) {
        self.xml.push_str("<w:p>");
        self.write_paragraph_properties(&para.style, bullet);
        for run in para.runs.iter().filter(|r| !r.is_empty()) {
            self.write_run(run);
        }
        self.xml.push_str("</w:p>");
    }

    fn write_paragraph_properties(&mut self, style: &ParagraphStyle, bullet: bool) {
        self.xml.push_str("<w:pPr>");

        if bullet {
            self.xml.push_str(&format!(
                r#"<w:pStyle w:val="{}"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                LIST_BULLET_STYLE, BULLET_NUM_ID
            ));
        }

        if style.bottom_border {
            self.xml.push_str(
                r#"<w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="000000"/></w:pBdr>"#,
            );
        }

        if style.space_before.is_some() || style.space_after.is_some() || style.line_spacing.is_some()
        {
            self.xml.push_str("<w:spacing");
            if let Some(before) = style.space_before {
                self.xml.push_str(&format!(r#" w:before="{}""#, twips(before)));
            }
            if let Some(after) = style.space_after {
                self.xml.push_str(&format!(r#" w:after="{}""#, twips(after)));
            }
            if let Some(line) = style.line_spacing {
                self.xml.push_str(&format!(
                    r#" w:line="{}" w:lineRule="auto""#,
                    (line * 240.0).round() as i32
                ));
            }
            self.xml.push_str("/>");
        }

        if style.indent_left.is_some() || style.first_line_indent.is_some() {
            self.xml.push_str("<w:ind");
            if let Some(left) = style.indent_left {
                self.xml.push_str(&format!(r#" w:left="{}""#, twips(left)));
            }
            if let Some(first) = style.first_line_indent {
                if first >= 0.0 {
                    self.xml.push_str(&format!(r#" w:firstLine="{}""#, twips(first)));
                } else {
                    self.xml.push_str(&format!(r#" w:hanging="{}""#, twips(-first)));
                }
            }
            self.xml.push_str("/>");
        }

        if style.alignment == Alignment::Center {
            self.xml.push_str(r#"<w:jc w:val="center"/>"#);
        }

        self.xml.push_str("</w:pPr>");
    }

    fn write_run(&mut self, run: &TextRun) {
        self.xml.push_str("<w:r>");
        self.write_run_properties(&run.style);

        for (i, line) in run.text.split('\n').enumerate() {
            if i > 0 {
                self.xml.push_str("<w:br/>");
            }
            for (j, segment) in line.split('\t').enumerate() {
                if j > 0 {
                    self.xml.push_str("<w:tab/>");
                }
                if segment.is_empty() {
                    continue;
                }
                if segment.starts_with(' ') || segment.ends_with(' ') {
                    self.xml.push_str(r#"<w:t xml:space="preserve">"#);
                } else {
                    self.xml.push_str("<w:t>");
                }
                self.xml.push_str(&escape_xml(segment));
                self.xml.push_str("</w:t>");
            }
        }

        self.xml.push_str("</w:r>");
    }

    fn write_run_properties(&mut self, style: &TextStyle) {
        let font = escape_xml(&style.font_name);
        let half_points = (style.font_size * 2.0).round() as u32;

        self.xml.push_str("<w:rPr>");
        self.xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            font
        ));
        if style.bold {
            self.xml.push_str("<w:b/>");
        }
        if style.italic {
            self.xml.push_str("<w:i/>");
        }
        self.xml
            .push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(&style.color)));
        self.xml.push_str(&format!(
            r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            half_points
        ));
        self.xml.push_str("</w:rPr>");
    }

    fn write_section_properties(&mut self, page: &PageSetup) {
        self.xml.push_str(&format!(
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
            twips(page.width),
            twips(page.height),
            twips(page.margin_top),
            twips(page.margin_right),
            twips(page.margin_bottom),
            twips(page.margin_left),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(blocks: &[Block]) -> String {
        DocumentXmlWriter::new().write(blocks, &PageSetup::letter())
    }

    #[test]
    fn test_section_header_border() {
        let para = Paragraph::with_run(TextRun::new("EDUCATION", TextStyle::default().bold(true)))
            .with_style(ParagraphStyle {
                space_before: Some(6.0),
                space_after: Some(3.0),
                bottom_border: true,
                ..Default::default()
            });
        let xml = write(&[Block::SectionHeader(para)]);

        assert!(xml.contains(r#"<w:bottom w:val="single" w:sz="6" w:space="1" w:color="000000"/>"#));
        assert!(xml.contains(r#"<w:spacing w:before="120" w:after="60"/>"#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:t>EDUCATION</w:t>"));
    }

    #[test]
    fn test_bullet_paragraph() {
        let para = Paragraph::with_run(TextRun::new("Shipped", TextStyle::default())).with_style(
            ParagraphStyle {
                indent_left: Some(18.0),
                first_line_indent: Some(-18.0),
                ..Default::default()
            },
        );
        let xml = write(&[Block::BulletItem(para)]);

        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="360" w:hanging="360"/>"#));
        assert!(!xml.contains("<w:jc"));
    }

    #[test]
    fn test_run_breaks_and_escaping() {
        let para = Paragraph::with_run(TextRun::new(
            "R&D\nRust, Go",
            TextStyle::new("Georgia", 10.5).italic(true),
        ));
        let xml = write(&[Block::Paragraph(para)]);

        assert!(xml.contains("<w:t>R&amp;D</w:t><w:br/><w:t>Rust, Go</w:t>"));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Georgia" w:hAnsi="Georgia" w:cs="Georgia"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="21"/>"#));
        assert!(xml.contains("<w:i/>"));
    }

    #[test]
    fn test_spacer_and_page() {
        let xml = write(&[Block::Spacer { space_after: 12.0 }]);
        assert!(xml.contains(r#"<w:p><w:pPr><w:spacing w:after="240"/></w:pPr></w:p>"#));
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:left="1440""#));
    }

    #[test]
    fn test_preserved_spaces() {
        let mut para = Paragraph::new();
        para.add_run(TextRun::new("Engineer", TextStyle::default()));
        para.add_run(TextRun::new(" | Acme", TextStyle::default()));
        let xml = write(&[Block::Paragraph(para.with_style(ParagraphStyle::centered(3.0)))]);

        assert!(xml.contains(r#"<w:t xml:space="preserve"> | Acme</w:t>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
    }
}
