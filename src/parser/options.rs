//! Parsing options and configuration.

use crate::model::DEFAULT_NAME;

/// Options for parsing resume sources.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Apply Unicode NFC normalization to the source before parsing
    pub normalize_unicode: bool,

    /// Name used when the source has no top-level heading
    pub default_name: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Keep the source text exactly as read.
    pub fn raw(mut self) -> Self {
        self.normalize_unicode = false;
        self
    }

    /// Set the fallback name.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            default_name: DEFAULT_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().raw().with_default_name("Candidate");

        assert!(!options.normalize_unicode);
        assert_eq!(options.default_name, "Candidate");
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.normalize_unicode);
        assert_eq!(options.default_name, "Resume");
    }
}
