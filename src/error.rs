//! Error types for resume-export library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resume-export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing, rendering or validating a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The resume source file does not exist.
    #[error("Resume file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A style file was requested but does not exist.
    #[error("Style file not found: {}", .0.display())]
    StyleAssetMissing(PathBuf),

    /// The style file exists but could not be understood.
    #[error("Invalid style configuration: {0}")]
    StyleConfig(String),

    /// ZIP container error while writing or reading a DOCX file.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error while reading a DOCX part.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The artifact could not be opened as a DOCX document.
    #[error("Cannot open as .docx file: {0}")]
    InvalidArtifact(String),

    /// Error during rendering (DOCX, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// No exporter is registered for the requested output format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(format!("Attribute error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::StyleConfig(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
