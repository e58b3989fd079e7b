//! Format detection by trial import.
//!
//! The registry holds one codec per supported format, in a fixed order, and tries
//! them one after another on an input. The first codec that parses the input wins.

use crate::{
    diagnostics::Warning,
    error::Error,
    formats::{FlatJson, FormatType, Xliff12},
    traits::{ImportContext, TranslationFormat},
    types::TranslationFile,
};

/// Result of a successful [`FormatRegistry::import`].
#[derive(Debug)]
pub struct Imported {
    /// The format that accepted the input.
    pub format: FormatType,
    pub files: Vec<TranslationFile>,
    /// Warnings raised by the accepting format only.
    pub warnings: Vec<Warning>,
}

/// Ordered list of the formats to try on import.
pub struct FormatRegistry {
    formats: Vec<Box<dyn TranslationFormat>>,
}

impl Default for FormatRegistry {
    /// XLIFF 1.2 first, then flat JSON.
    fn default() -> Self {
        Self {
            formats: vec![Box::new(Xliff12), Box::new(FlatJson)],
        }
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.formats.iter().map(|format| format.format_type()))
            .finish()
    }
}

impl FormatRegistry {
    /// A registry trying exactly `formats`, in order.
    pub fn new(formats: Vec<Box<dyn TranslationFormat>>) -> Self {
        Self { formats }
    }

    /// Formats in trial order.
    pub fn format_types(&self) -> Vec<FormatType> {
        self.formats.iter().map(|format| format.format_type()).collect()
    }

    /// The codec registered for `format_type`.
    pub fn get(&self, format_type: FormatType) -> Option<&dyn TranslationFormat> {
        self.formats
            .iter()
            .find(|format| format.format_type() == format_type)
            .map(|format| format.as_ref())
    }

    /// Imports `text` with the first format that accepts it.
    ///
    /// `known` are the files already loaded; formats that need a baseline look there.
    /// An [`Error::UnsupportedVersion`] ends the search right away. If no format
    /// accepts the input, the error lists every format's reason.
    pub fn import(
        &self,
        name: &str,
        text: &str,
        known: &[TranslationFile],
    ) -> Result<Imported, Error> {
        let mut reasons = Vec::new();

        for format in &self.formats {
            let format_type = format.format_type();
            let mut context = ImportContext::new(known);

            match format.import(name, text, &mut context) {
                Ok(files) => {
                    tracing::debug!(
                        "imported `{}` as {} ({} file(s))",
                        name,
                        format_type,
                        files.len()
                    );
                    return Ok(Imported {
                        format: format_type,
                        files,
                        warnings: context.into_warnings(),
                    });
                }
                Err(error) if !error.is_recoverable() => {
                    tracing::debug!("`{}` rejected by {}: {}", name, format_type, error);
                    return Err(error);
                }
                Err(error) => {
                    tracing::debug!("`{}` is not {}: {}", name, format_type, error);
                    reasons.push(format!("{}: {}", format_type, error));
                }
            }
        }

        Err(Error::AllFormatsFailed {
            name: name.to_string(),
            reasons,
        })
    }
}
