//! Line classification shared by the section parsers.

/// Shape of a single trimmed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// Empty or whitespace only
    Blank,
    /// `#`-run followed by a space; carries the number of `#`
    Heading(u8),
    /// Starts and ends with `**`
    Bold,
    /// Starts with a `**` span followed by more text
    BoldLead,
    /// Starts and ends with `*` (and is not `Bold`)
    Italic,
    /// Starts with `- `
    Bullet,
    /// Anything else
    Text,
}

/// A trimmed line together with its classification.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub text: &'a str,
    pub kind: LineKind,
}

impl<'a> Line<'a> {
    /// Trim and classify a raw line.
    pub fn classify(raw: &'a str) -> Self {
        let text = raw.trim();
        let kind = if text.is_empty() {
            LineKind::Blank
        } else if let Some(level) = heading_level(text) {
            LineKind::Heading(level)
        } else if text.starts_with("**") && text.ends_with("**") {
            LineKind::Bold
        } else if text.starts_with("**") && text[2..].contains("**") {
            LineKind::BoldLead
        } else if text.starts_with('*') && text.ends_with('*') {
            LineKind::Italic
        } else if text.starts_with("- ") {
            LineKind::Bullet
        } else {
            LineKind::Text
        };
        Self { text, kind }
    }

    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }

    /// Check for a heading of exactly `level`.
    pub fn is_heading(&self, level: u8) -> bool {
        self.kind == LineKind::Heading(level)
    }

    /// Either bold or italic wrapping.
    pub fn is_emphasis(&self) -> bool {
        matches!(self.kind, LineKind::Bold | LineKind::Italic)
    }

    /// Text after the heading marker, trimmed.
    pub fn heading_text(&self) -> &'a str {
        self.text.trim_start_matches('#').trim()
    }

    /// Text with surrounding `*` markers removed, trimmed.
    pub fn unwrapped(&self) -> &'a str {
        self.text.trim_matches('*').trim()
    }

    /// Text with a leading bullet marker removed.
    pub fn without_bullet(&self) -> &'a str {
        strip_bullet(self.text)
    }
}

/// Number of leading `#` when followed by a space.
fn heading_level(text: &str) -> Option<u8> {
    let hashes = text.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > u8::MAX as usize {
        return None;
    }
    if text[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Remove a leading `- `, `* ` or `• ` marker.
pub(crate) fn strip_bullet(text: &str) -> &str {
    ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| text.strip_prefix(marker))
        .map(str::trim_start)
        .unwrap_or(text)
}
