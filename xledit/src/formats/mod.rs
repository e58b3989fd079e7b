//! All supported localization file formats for xledit.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod flat_json;
pub mod xliff12;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use flat_json::{FlatJson, Format as FlatJsonFormat};
pub use xliff12::{Format as Xliff12Format, Xliff12};

use crate::Error;

/// Represents all supported localization file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// XLIFF 1.2 documents (`.xlf`, `.xliff`).
    Xliff12,
    /// Flat key/value JSON, one file per locale (`en_us.json`).
    FlatJson,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use xledit::formats::FormatType;
/// assert_eq!(FormatType::Xliff12.to_string(), "xliff");
/// assert_eq!(FormatType::FlatJson.to_string(), "json");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Xliff12 => write!(f, "xliff"),
            FormatType::FlatJson => write!(f, "json"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts the following case-insensitive strings:
/// - `"xliff"`, `"xlf"`, `"xliff12"` → `FormatType::Xliff12`
/// - `"json"`, `"flat-json"`, `"minecraft"` → `FormatType::FlatJson`
///
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
///
/// # Example
/// ```rust
/// use xledit::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("XLF").unwrap(), FormatType::Xliff12);
/// assert_eq!(FormatType::from_str("json").unwrap(), FormatType::FlatJson);
/// assert!(FormatType::from_str("foobar").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "xliff" | "xlf" | "xliff12" => Ok(FormatType::Xliff12),
            "json" | "flat-json" | "minecraft" => Ok(FormatType::FlatJson),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Every format, in the order the registry tries them.
    pub const ALL: [FormatType; 2] = [FormatType::Xliff12, FormatType::FlatJson];

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Xliff12 => "xlf",
            FormatType::FlatJson => "json",
        }
    }

    /// Human-readable name, as shown in file dialogs.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Xliff12 => "XLIFF 1.2",
            FormatType::FlatJson => "Flat JSON",
        }
    }

    /// Guesses the format from a file extension (without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlf" | "xliff" => Some(FormatType::Xliff12),
            "json" => Some(FormatType::FlatJson),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_type_display() {
        assert_eq!(FormatType::Xliff12.to_string(), "xliff");
        assert_eq!(FormatType::FlatJson.to_string(), "json");
    }

    #[test]
    fn test_format_type_from_str() {
        assert_eq!(FormatType::from_str("xliff").unwrap(), FormatType::Xliff12);
        assert_eq!(FormatType::from_str(" XLIFF12 ").unwrap(), FormatType::Xliff12);
        assert_eq!(FormatType::from_str("minecraft").unwrap(), FormatType::FlatJson);
        assert_eq!(FormatType::from_str("Flat-JSON").unwrap(), FormatType::FlatJson);

        let error = FormatType::from_str("po").unwrap_err();
        assert!(matches!(error, Error::UnknownFormat(ref f) if f == "po"));
    }

    #[test]
    fn test_format_type_extension() {
        assert_eq!(FormatType::Xliff12.extension(), "xlf");
        assert_eq!(FormatType::FlatJson.extension(), "json");
        assert_eq!(FormatType::from_extension("XLIFF"), Some(FormatType::Xliff12));
        assert_eq!(FormatType::from_extension("xlf"), Some(FormatType::Xliff12));
        assert_eq!(FormatType::from_extension("json"), Some(FormatType::FlatJson));
        assert_eq!(FormatType::from_extension("strings"), None);
    }

    #[test]
    fn test_registry_order_starts_with_xliff() {
        assert_eq!(FormatType::ALL[0], FormatType::Xliff12);
        assert_eq!(FormatType::ALL.len(), 2);
    }
}
