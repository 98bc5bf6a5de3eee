//! Plain text rendering for rendered resumes.

use crate::model::{Block, RenderedDocument};

/// Convert a rendered document to plain text.
///
/// Bullets are prefixed with `- `; spacers become a single blank line.
pub fn to_text(doc: &RenderedDocument) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(doc.block_count());

    for block in &doc.blocks {
        let line = match block {
            Block::Paragraph(p) | Block::SectionHeader(p) => p.plain_text(),
            Block::BulletItem(p) => format!("- {}", p.plain_text()),
            Block::Spacer { .. } => String::new(),
        };
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}
