//! All error types for the xledit crate.
//!
//! These are returned from all fallible operations (parsing, serialization, format
//! detection, file I/O). Non-fatal conditions are not errors; see
//! [`crate::diagnostics::Warning`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input is missing an element or attribute the format requires.
    #[error("structure error: {0}")]
    Structure(String),

    /// The document is XLIFF, but of a version this crate does not read.
    #[error("unsupported XLIFF version `{0}` (only 1.2 and below are supported)")]
    UnsupportedVersion(String),

    /// Every registered format rejected the input.
    #[error("unable to parse `{name}` with any known format ({})", reasons.join("; "))]
    AllFormatsFailed { name: String, reasons: Vec<String> },

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

impl Error {
    /// Creates a new structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Error::Structure(message.into())
    }

    /// Whether the format registry may go on to try the next format after this error.
    ///
    /// An unsupported XLIFF version is recognizably XLIFF, so no other format gets a
    /// chance to misread it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::UnsupportedVersion(_))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttribute(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_structure_error() {
        let error = Error::structure("missing <body>");
        assert_eq!(error.to_string(), "structure error: missing <body>");
    }

    #[test]
    fn test_unsupported_version_error() {
        let error = Error::UnsupportedVersion("2.0".to_string());
        assert!(error.to_string().contains("`2.0`"));
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_all_formats_failed_lists_reasons() {
        let error = Error::AllFormatsFailed {
            name: "broken".to_string(),
            reasons: vec![
                "xliff: no <xliff> root".to_string(),
                "json: expected value".to_string(),
            ],
        };
        let display = error.to_string();
        assert!(display.contains("`broken`"));
        assert!(display.contains("xliff: no <xliff> root; json: expected value"));
    }

    #[test]
    fn test_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::Parse(json_error);
        assert!(error.to_string().contains("parse error"));
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownFormat("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownFormat"));
        assert!(debug.contains("test"));
    }
}
