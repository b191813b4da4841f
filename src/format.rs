//! Book format detection from file names.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// The three supported book formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Line-oriented plain text (`.txt`).
    Text,
    /// FictionBook 2 XML (`.fb2`).
    FictionBook,
    /// Zipped XHTML package (`.epub`).
    Epub,
}

impl Format {
    /// Detect the format from the text after the last `.` in `name`.
    ///
    /// Matching is case-insensitive. Names without a `.` are rejected.
    ///
    /// ```
    /// use scrollbook::Format;
    ///
    /// assert_eq!(Format::from_file_name("Book.EPUB").unwrap(), Format::Epub);
    /// assert!(Format::from_file_name("README").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or_else(|| Error::UnrecognizedFormat(name.to_string()))?;

        match ext.as_str() {
            "txt" => Ok(Format::Text),
            "fb2" => Ok(Format::FictionBook),
            "epub" => Ok(Format::Epub),
            _ => Err(Error::UnrecognizedFormat(name.to_string())),
        }
    }

    /// Detect the format from the final component of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .ok_or_else(|| Error::UnrecognizedFormat(path.display().to_string()))?;
        Self::from_file_name(&name)
    }

    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::FictionBook => "fb2",
            Format::Epub => "epub",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Text => "plain text",
            Format::FictionBook => "FictionBook",
            Format::Epub => "EPUB",
        };
        f.write_str(name)
    }
}
