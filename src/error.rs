//! Error types for scrollbook operations.

use thiserror::Error;

/// Errors that can occur while turning a book file into segments.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unrecognized format: {0}")]
    UnrecognizedFormat(String),

    #[error("invalid archive: {0}")]
    MalformedArchive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed markup: {0}")]
    Markup(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Text decoding error: {0}")]
    Encoding(String),
}

/// Coarse classification of an [`Error`].
///
/// Lets callers tell the three failure classes apart without matching on
/// the underlying library errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file name does not carry one of the supported extensions.
    UnrecognizedFormat,
    /// The archive is missing its container descriptor, package path or package document.
    MalformedArchive,
    /// Bytes could not be read or decoded (I/O, ZIP, XML, text encoding).
    DecodingFailure,
}

impl Error {
    pub(crate) fn missing(what: &str) -> Self {
        Error::MalformedArchive(format!("missing {what}"))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnrecognizedFormat(_) => ErrorKind::UnrecognizedFormat,
            Error::MalformedArchive(_) => ErrorKind::MalformedArchive,
            Error::Io(_)
            | Error::Zip(_)
            | Error::Xml(_)
            | Error::Markup(_)
            | Error::Utf8(_)
            | Error::Encoding(_) => ErrorKind::DecodingFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message() {
        let err = Error::missing("container descriptor");
        assert_eq!(err.to_string(), "invalid archive: missing container descriptor");
        assert_eq!(err.kind(), ErrorKind::MalformedArchive);
    }

    #[test]
    fn test_decoding_kinds() {
        let io = Error::from(std::io::Error::other("boom"));
        assert_eq!(io.kind(), ErrorKind::DecodingFailure);

        let bytes = vec![0xffu8, 0xfe];
        let utf8 = Error::from(std::str::from_utf8(&bytes).unwrap_err());
        assert_eq!(utf8.kind(), ErrorKind::DecodingFailure);
    }
}
