//! Rendered document types.

use super::Paragraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// An ordered sequence of styled blocks ready to be serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Document properties (title, author, timestamps)
    pub properties: DocumentProperties,

    /// Page geometry
    pub page: PageSetup,

    /// Content blocks in display order
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    /// Create a new empty document on a Letter page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of every block, one entry per paragraph (spacers are empty).
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.blocks.iter().map(Block::plain_text).collect()
    }

    /// Titles of all section headers, in order.
    pub fn section_titles(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::SectionHeader(p) => Some(p.plain_text()),
                _ => None,
            })
            .collect()
    }

    /// Every distinct font family used by a run.
    pub fn fonts_used(&self) -> BTreeSet<String> {
        self.blocks
            .iter()
            .filter_map(Block::paragraph)
            .flat_map(|p| p.runs.iter())
            .map(|r| r.style.font_name.clone())
            .collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraph_texts().join("\n")
    }
}

/// A block in a rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "paragraph", rename_all = "snake_case")]
pub enum Block {
    /// Regular paragraph
    Paragraph(Paragraph),

    /// Bulleted list item with a hanging indent
    BulletItem(Paragraph),

    /// Section title with a bottom rule
    SectionHeader(Paragraph),

    /// Empty paragraph used for vertical spacing
    Spacer {
        /// Space after in points
        space_after: f32,
    },
}

impl Block {
    /// Get the paragraph carried by this block, if any.
    pub fn paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) | Block::BulletItem(p) | Block::SectionHeader(p) => Some(p),
            Block::Spacer { .. } => None,
        }
    }

    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        self.paragraph().map(Paragraph::plain_text).unwrap_or_default()
    }

    /// Check if this is a bullet item.
    pub fn is_bullet(&self) -> bool {
        matches!(self, Block::BulletItem(_))
    }
}

/// Page geometry, all values in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageSetup {
    /// US Letter (8.5 x 11 inches) with one-inch margins.
    pub fn letter() -> Self {
        Self {
            width: 8.5 * POINTS_PER_INCH,
            height: 11.0 * POINTS_PER_INCH,
            margin_top: POINTS_PER_INCH,
            margin_bottom: POINTS_PER_INCH,
            margin_left: POINTS_PER_INCH,
            margin_right: POINTS_PER_INCH,
        }
    }

    /// Set margins from inch values.
    pub fn with_margins_inches(mut self, top: f32, bottom: f32, left: f32, right: f32) -> Self {
        self.margin_top = top * POINTS_PER_INCH;
        self.margin_bottom = bottom * POINTS_PER_INCH;
        self.margin_left = left * POINTS_PER_INCH;
        self.margin_right = right * POINTS_PER_INCH;
        self
    }

    /// Width available for text.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

/// Document properties written to the package core properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentProperties {
    /// Document title
    pub title: Option<String>,

    /// Author
    pub creator: Option<String>,

    /// Creation timestamp; left unset by the renderer
    pub created: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TextRun, TextStyle};

    #[test]
    fn test_document_new() {
        let doc = RenderedDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page, PageSetup::letter());
    }

    #[test]
    fn test_fonts_and_titles() {
        let mut doc = RenderedDocument::new();
        doc.add_block(Block::SectionHeader(Paragraph::with_run(TextRun::new(
            "EDUCATION",
            TextStyle::new("Georgia", 12.0),
        ))));
        doc.add_block(Block::Spacer { space_after: 12.0 });
        doc.add_block(Block::BulletItem(Paragraph::with_run(TextRun::new(
            "AWS Certified",
            TextStyle::new("Calibri", 11.0),
        ))));

        assert_eq!(doc.section_titles(), vec!["EDUCATION".to_string()]);
        assert_eq!(doc.fonts_used().len(), 2);
        assert_eq!(doc.paragraph_texts(), vec!["EDUCATION", "", "AWS Certified"]);
        assert!(doc.blocks[2].is_bullet());
    }

    #[test]
    fn test_page_margins() {
        let page = PageSetup::letter().with_margins_inches(0.5, 0.5, 0.75, 0.75);
        assert_eq!(page.margin_top, 36.0);
        assert_eq!(page.content_width(), 612.0 - 108.0);
    }
}
