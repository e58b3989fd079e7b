//! Traits for format-agnostic parsing and serialization in xledit.
//!
//! [`Parser`] is the low-level reader/writer every concrete format struct implements.
//! [`TranslationFormat`] is the import/export contract the [`crate::registry`] works
//! with: raw text in, [`TranslationFile`]s out, and back.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{
    diagnostics::{Diagnostics, Warning},
    error::Error,
    formats::FormatType,
    options::ExportOptions,
    types::{TranslationFile, originating_file},
};

/// A trait for parsing and writing one concrete file format.
///
/// # Example
///
/// ```rust,no_run
/// use xledit::traits::Parser;
/// let format = xledit::formats::xliff12::Format::read_from("messages.xlf")?;
/// format.write_to("messages_copy.xlf")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// What an importer may consult besides its own input: the files the caller already
/// holds, and a place to report warnings.
#[derive(Debug)]
pub struct ImportContext<'a> {
    known_files: &'a [TranslationFile],
    diagnostics: Diagnostics,
}

impl<'a> ImportContext<'a> {
    pub fn new(known_files: &'a [TranslationFile]) -> Self {
        Self {
            known_files,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn known_files(&self) -> &'a [TranslationFile] {
        self.known_files
    }

    /// The already-loaded source file `file` is a translation of, if any.
    pub fn originating_file(&self, file: &TranslationFile) -> Option<&'a TranslationFile> {
        originating_file(self.known_files, file)
    }

    pub fn warn(&mut self, warning: Warning) {
        self.diagnostics.warn(warning);
    }

    /// Takes over warnings a parser already logged.
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.diagnostics.extend(warnings);
    }

    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.diagnostics.into_warnings()
    }
}

/// Import/export contract implemented by every supported format.
///
/// `import` either parses the whole input or fails; there is no partial result.
pub trait TranslationFormat {
    fn format_type(&self) -> FormatType;

    /// Parses `text`, imported under `name` (a file name without extension).
    fn import(
        &self,
        name: &str,
        text: &str,
        context: &mut ImportContext<'_>,
    ) -> Result<Vec<TranslationFile>, Error>;

    /// Serializes `files`, which normally share one source language.
    fn export_with_options(
        &self,
        files: &[TranslationFile],
        options: &ExportOptions,
    ) -> Result<String, Error>;

    fn export(&self, files: &[TranslationFile]) -> Result<String, Error> {
        self.export_with_options(files, &ExportOptions::default())
    }
}
