//! DOCX artifact detection.
//!
//! A DOCX file is a ZIP archive; these helpers only look at the local file
//! header signature so callers can reject obviously wrong input before
//! handing it to the inspector.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// ZIP local file header: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Empty ZIP archive (end of central directory only): PK\x05\x06
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Container kind of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// A ZIP container that may hold a WordprocessingML package.
    Docx,
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactFormat::Docx => write!(f, "DOCX"),
        }
    }
}

/// Detect the artifact format from a file path.
///
/// # Example
/// ```no_run
/// use resume_export::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("resume.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ArtifactFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 4];
    reader
        .read_exact(&mut header)
        .map_err(|_| Error::InvalidArtifact("file is too short".into()))?;
    detect_format_from_bytes(&header)
}

/// Detect the artifact format from the leading bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ArtifactFormat> {
    if data.len() < ZIP_MAGIC.len() {
        return Err(Error::InvalidArtifact("file is too short".into()));
    }

    if data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC) {
        return Ok(ArtifactFormat::Docx);
    }

    Err(Error::InvalidArtifact("not a ZIP container".into()))
}

/// Check if a file looks like a DOCX container.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip_header() {
        let data = b"PK\x03\x04\x14\x00\x00\x00";
        assert_eq!(detect_format_from_bytes(data).unwrap(), ArtifactFormat::Docx);
    }

    #[test]
    fn test_detect_rejects_text() {
        let result = detect_format_from_bytes(b"# Jane Doe\n");
        assert!(matches!(result, Err(Error::InvalidArtifact(_))));
    }

    #[test]
    fn test_detect_too_short() {
        assert!(!is_docx_bytes(b"PK"));
        assert!(!is_docx_bytes(b""));
    }

    #[test]
    fn test_detect_missing_file() {
        assert!(!is_docx("/definitely/not/here.docx"));
    }
}
