//! This module provides the [`Codec`] struct, which holds the translation files an
//! editing session works on and moves them in and out of text and files.
//!
//! Importing goes through the [`FormatRegistry`], so the caller never has to name a
//! format up front: the first format that parses the input wins. Files imported
//! earlier serve as baselines for later imports (flat JSON translations look up their
//! source texts there), so baseline files should be loaded first.

use std::{fs, io::Read, path::Path};

use crate::{
    diagnostics::Warning,
    error::Error,
    formats::FormatType,
    options::ExportOptions,
    registry::FormatRegistry,
    types::{self, TranslationFile},
};

/// The files of one editing session plus the warnings raised while loading them.
#[derive(Debug, Default)]
pub struct Codec {
    /// Every imported file, in import order.
    pub files: Vec<TranslationFile>,
    warnings: Vec<Warning>,
    registry: FormatRegistry,
}

impl Codec {
    /// Creates a new, empty `Codec` using the default format registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `Codec` importing with `registry`.
    pub fn with_registry(registry: FormatRegistry) -> Self {
        Codec {
            files: Vec::new(),
            warnings: Vec::new(),
            registry,
        }
    }

    /// Returns an iterator over all files.
    pub fn iter(&self) -> std::slice::Iter<'_, TranslationFile> {
        self.files.iter()
    }

    /// Returns a mutable iterator over all files.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, TranslationFile> {
        self.files.iter_mut()
    }

    /// Finds a file by the language its text is in.
    pub fn get_by_language(&self, language: &str) -> Option<&TranslationFile> {
        self.files
            .iter()
            .find(|file| file.effective_language() == language)
    }

    /// Adds a file built elsewhere.
    pub fn add_file(&mut self, file: TranslationFile) {
        self.files.push(file);
    }

    /// Imports `text` under `name` and appends the resulting files.
    ///
    /// Returns the format that accepted the input.
    pub fn import_str(&mut self, name: &str, text: &str) -> Result<FormatType, Error> {
        let imported = self.registry.import(name, text, &self.files)?;
        tracing::info!(
            "loaded {} file(s) from `{}` as {}",
            imported.files.len(),
            name,
            imported.format
        );
        self.files.extend(imported.files);
        self.warnings.extend(imported.warnings);
        Ok(imported.format)
    }

    /// Reads and imports the file at `path`.
    ///
    /// A UTF-8 or UTF-16 byte order mark is honored. The import name is the file name
    /// without its last extension.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<FormatType, Error> {
        let path = path.as_ref();
        let text = read_to_string(path)?;
        let name = import_name(path);
        self.import_str(&name, &text)
    }

    /// Serializes every file with `format`.
    pub fn export(&self, format: FormatType, options: &ExportOptions) -> Result<String, Error> {
        export_files(&self.registry, &self.files, format, options)
    }

    /// Serializes `files` (usually a file and its translations) with `format`.
    pub fn export_files(
        &self,
        files: &[TranslationFile],
        format: FormatType,
        options: &ExportOptions,
    ) -> Result<String, Error> {
        export_files(&self.registry, files, format, options)
    }

    /// Writes every file to `path` with `format`, creating parent directories.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: FormatType,
        options: &ExportOptions,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let text = self.export(format, options)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        fs::write(path, text).map_err(Error::Io)?;
        tracing::info!("wrote {} file(s) to {}", self.files.len(), path.display());
        Ok(())
    }

    /// Warnings raised since the last call, oldest first.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The loaded source file `file` is a translation of.
    pub fn originating_file(&self, file: &TranslationFile) -> Option<&TranslationFile> {
        types::originating_file(&self.files, file)
    }

    /// `file` and every loaded file translating from its language.
    pub fn derived_files(&self, file: &TranslationFile) -> Vec<&TranslationFile> {
        types::derived_files(&self.files, file)
    }
}

fn export_files(
    registry: &FormatRegistry,
    files: &[TranslationFile],
    format: FormatType,
    options: &ExportOptions,
) -> Result<String, Error> {
    let codec = registry
        .get(format)
        .ok_or_else(|| Error::UnknownFormat(format.to_string()))?;
    codec.export_with_options(files, options)
}

/// Reads a whole file as text, decoding UTF-16 when a byte order mark says so.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = fs::File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}

/// File name without its last extension: `fr_fr.json` → `fr_fr`, `app.en.xlf` → `app.en`.
pub fn import_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Infers a [`FormatType`] from a file path's extension.
///
/// Returns `Some(FormatType)` if the extension matches a known format, otherwise `None`.
///
/// # Example
/// ```rust
/// use xledit::formats::FormatType;
/// use xledit::codec::infer_format_from_extension;
/// assert_eq!(infer_format_from_extension("app.xlf"), Some(FormatType::Xliff12));
/// assert_eq!(infer_format_from_extension("app.xliff"), Some(FormatType::Xliff12));
/// assert_eq!(infer_format_from_extension("en_us.json"), Some(FormatType::FlatJson));
/// assert_eq!(infer_format_from_extension("foo.txt"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .and_then(FormatType::from_extension)
}
