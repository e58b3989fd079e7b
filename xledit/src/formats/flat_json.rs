//! Support for flat key/value JSON language files (`en_us.json`, `fr_fr.json`, ...).
//!
//! One file holds one locale; the locale comes from the file name. `en_us` is the
//! baseline: its values are source texts. Every other locale is a translation of it,
//! and takes its source texts from the baseline file if one was imported earlier.

use std::{
    io::{BufRead, Write},
    path::Path,
    str::FromStr,
};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::{
    codec,
    diagnostics::Warning,
    error::Error,
    formats::FormatType,
    options::ExportOptions,
    traits::{ImportContext, Parser, TranslationFormat},
    tree,
    types::{Group, TranslationFile, Unit},
};

/// Locale whose file carries the source texts.
pub const BASELINE_LOCALE: &str = "en-US";

/// Joins nested group identifiers into a flat key.
pub const KEY_SEPARATOR: &str = ".";

lazy_static! {
    /// `{language}_{region}`, e.g. `en_us`, `pt_BR`, `es_419`.
    static ref LOCALE_FILE_NAME: Regex =
        Regex::new(r"^([A-Za-z]{2,3})_([A-Za-z]{2}|[0-9]{3})$").expect("valid regex");
}

/// Turns a language file name into a locale tag: `fr_fr` becomes `fr-FR`.
pub fn locale_from_name(name: &str) -> Result<String, Error> {
    let stem = name.strip_suffix(".json").unwrap_or(name);
    let captures = LOCALE_FILE_NAME.captures(stem).ok_or_else(|| {
        Error::structure(format!(
            "`{}` is not a language file name (expected e.g. `en_us`)",
            name
        ))
    })?;

    let candidate = format!(
        "{}-{}",
        captures[1].to_ascii_lowercase(),
        captures[2].to_ascii_uppercase()
    );
    let locale = LanguageIdentifier::from_str(&candidate)
        .map_err(|e| Error::structure(format!("`{}` is not a valid locale: {}", candidate, e)))?;
    Ok(locale.to_string())
}

/// A flat JSON language file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Format {
    pub locale: String,
    /// Keys and values in file order.
    pub entries: IndexMap<String, String>,
}

impl Format {
    /// Parses `text` as the language file called `name`.
    pub fn parse(name: &str, text: &str) -> Result<Self, Error> {
        let locale = locale_from_name(name)?;
        let entries = serde_json::from_str(text).map_err(Error::Parse)?;
        Ok(Format { locale, entries })
    }

    pub fn is_baseline(&self) -> bool {
        self.locale == BASELINE_LOCALE
    }

    /// Flattens `files` into one key/value map.
    ///
    /// Source files contribute source texts; translations contribute their non-empty
    /// targets. A key already taken by an earlier file is kept.
    pub fn from_files(files: &[TranslationFile]) -> Self {
        let mut entries = IndexMap::new();
        for file in files {
            let mut flattened = IndexMap::new();
            flatten_group(&file.root, file.is_source(), &mut Vec::new(), &mut flattened);
            for (key, value) in flattened {
                entries.entry(key).or_insert(value);
            }
        }

        Format {
            locale: files
                .first()
                .map(|file| file.effective_language().to_string())
                .unwrap_or_else(|| BASELINE_LOCALE.to_string()),
            entries,
        }
    }

    /// Builds the translation file imported as `name`.
    ///
    /// Derived locales look their source texts up in the baseline file known to
    /// `context`. Without one, the key stands in as source text and a warning is
    /// raised for each unit.
    pub fn into_file(self, name: &str, context: &mut ImportContext<'_>) -> TranslationFile {
        let filename = name.strip_suffix(".json").unwrap_or(name);
        let is_baseline = self.is_baseline();
        let mut file = TranslationFile::new(filename, BASELINE_LOCALE, Some(self.locale));

        let baseline = if is_baseline {
            None
        } else {
            context.originating_file(&file)
        };

        for (key, value) in self.entries {
            let unit = if is_baseline {
                Unit::new(key, Vec::new(), value)
            } else {
                let source = match baseline {
                    Some(baseline) => tree::get_unit(&baseline.root, &[key.as_str()])
                        .map(|unit| unit.source_text().to_string())
                        .unwrap_or_else(|| {
                            tracing::debug!("{}: `{}` is not in the baseline file", filename, key);
                            key.clone()
                        }),
                    None => {
                        context.warn(Warning::MissingBaseline {
                            file: filename.to_string(),
                            key: key.clone(),
                        });
                        key.clone()
                    }
                };
                Unit::new(key, Vec::new(), source).with_target(value)
            };
            file.root.add_unit(unit);
        }
        file
    }

    pub fn to_writer_with_options<W: Write>(
        &self,
        writer: W,
        options: &ExportOptions,
    ) -> Result<(), Error> {
        let indent = options.indent_unit();
        let mut writer = writer;
        {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            self.entries.serialize(&mut serializer).map_err(Error::Parse)?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Parser for Format {
    /// Parses an unnamed file, which is taken to be the baseline.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let entries = serde_json::from_reader(reader).map_err(Error::Parse)?;
        Ok(Format {
            locale: BASELINE_LOCALE.to_string(),
            entries,
        })
    }

    /// Reads a file, taking the locale from its name and honoring a byte order mark.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let text = codec::read_to_string(&path)?;
        Self::parse(&codec::import_name(&path), &text)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.to_writer_with_options(writer, &ExportOptions::default())
    }
}

/// Collects `group`'s texts under dotted keys. Nested groups come before the group's
/// own units.
fn flatten_group(
    group: &Group,
    is_source: bool,
    prefix: &mut Vec<String>,
    out: &mut IndexMap<String, String>,
) {
    for nested in &group.groups {
        prefix.push(nested.id.clone());
        flatten_group(nested, is_source, prefix, out);
        prefix.pop();
    }

    for unit in &group.units {
        let text = if is_source {
            Some(unit.source_text())
        } else {
            unit.target_text().filter(|text| !text.is_empty())
        };
        if let Some(text) = text {
            let key = if prefix.is_empty() {
                unit.id.clone()
            } else {
                format!("{}{}{}", prefix.join(KEY_SEPARATOR), KEY_SEPARATOR, unit.id)
            };
            out.entry(key).or_insert_with(|| text.to_string());
        }
    }
}

/// Registry entry for flat JSON language files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatJson;

impl TranslationFormat for FlatJson {
    fn format_type(&self) -> FormatType {
        FormatType::FlatJson
    }

    fn import(
        &self,
        name: &str,
        text: &str,
        context: &mut ImportContext<'_>,
    ) -> Result<Vec<TranslationFile>, Error> {
        let format = Format::parse(name, text)?;
        Ok(vec![format.into_file(name, context)])
    }

    fn export_with_options(
        &self,
        files: &[TranslationFile],
        options: &ExportOptions,
    ) -> Result<String, Error> {
        let mut out = Vec::new();
        Format::from_files(files).to_writer_with_options(&mut out, options)?;
        String::from_utf8(out).map_err(|e| Error::InvalidResource(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const BASELINE: &str = indoc! {r#"
        {
          "menu.title": "Main Menu",
          "menu.quit": "Quit Game",
          "block.stone": "Stone"
        }
    "#};

    const FRENCH: &str = indoc! {r#"
        {
          "menu.title": "Menu principal",
          "block.stone": "Pierre",
          "item.unknown": "Inconnu"
        }
    "#};

    fn import(name: &str, text: &str, known: &[TranslationFile]) -> (TranslationFile, Vec<Warning>) {
        let mut context = ImportContext::new(known);
        let mut files = FlatJson.import(name, text, &mut context).unwrap();
        assert_eq!(files.len(), 1);
        (files.remove(0), context.into_warnings())
    }

    #[test]
    fn test_locale_from_name() {
        assert_eq!(locale_from_name("en_us").unwrap(), "en-US");
        assert_eq!(locale_from_name("pt_br.json").unwrap(), "pt-BR");
        assert_eq!(locale_from_name("ES_419").unwrap(), "es-419");
        assert!(matches!(locale_from_name("messages"), Err(Error::Structure(_))));
        assert!(matches!(locale_from_name("en_us_extra"), Err(Error::Structure(_))));
        assert!(matches!(locale_from_name("e1_us"), Err(Error::Structure(_))));
    }

    #[test]
    fn test_baseline_import() {
        let (file, warnings) = import("en_us", BASELINE, &[]);
        assert!(warnings.is_empty());
        assert_eq!(file.filename, "en_us");
        assert_eq!(file.source_language, "en-US");
        assert_eq!(file.target_language.as_deref(), Some("en-US"));
        assert!(file.is_source());

        let ids: Vec<_> = file.root.units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["menu.title", "menu.quit", "block.stone"]);
        assert_eq!(file.root.units[0].source_text(), "Main Menu");
        assert_eq!(file.root.units[0].target, None);
        assert!(file.root.groups.is_empty());
    }

    #[test]
    fn test_derived_import_uses_baseline_sources() {
        let (baseline, _) = import("en_us", BASELINE, &[]);
        let (french, warnings) = import("fr_fr", FRENCH, &[baseline]);
        assert!(warnings.is_empty());
        assert_eq!(french.target_language.as_deref(), Some("fr-FR"));
        assert!(!french.is_source());

        let title = &french.root.units[0];
        assert_eq!(title.source_text(), "Main Menu");
        assert_eq!(title.target_text(), Some("Menu principal"));

        // Keys missing from the baseline fall back to the key itself.
        let unknown = &french.root.units[2];
        assert_eq!(unknown.source_text(), "item.unknown");
    }

    #[test]
    fn test_derived_import_without_baseline_warns_per_unit() {
        let (french, warnings) = import("fr_fr", FRENCH, &[]);
        assert_eq!(french.root.units[0].source_text(), "menu.title");
        assert_eq!(warnings.len(), 3);
        assert_eq!(
            warnings[1],
            Warning::MissingBaseline {
                file: "fr_fr".to_string(),
                key: "block.stone".to_string(),
            }
        );
    }

    #[test]
    fn test_non_json_input_fails() {
        let mut context = ImportContext::new(&[]);
        let error = FlatJson
            .import("en_us", "<xliff version=\"1.2\"/>", &mut context)
            .unwrap_err();
        assert!(matches!(error, Error::Parse(_)));

        let error = FlatJson
            .import("en_us", r#"{"a": 1}"#, &mut context)
            .unwrap_err();
        assert!(matches!(error, Error::Parse(_)));

        let error = FlatJson
            .import("en_us", r#"["a"]"#, &mut context)
            .unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
    }

    #[test]
    fn test_bad_file_name_fails() {
        let mut context = ImportContext::new(&[]);
        let error = FlatJson.import("strings", BASELINE, &mut context).unwrap_err();
        assert!(matches!(error, Error::Structure(_)));
    }

    #[test]
    fn test_export_flattens_groups_with_dots() {
        let mut file = TranslationFile::new("en_us", BASELINE_LOCALE, None);
        let mut menu = Group::new("menu", vec!["menu".to_string()]);
        let mut sub = Group::new("sub", vec!["menu".to_string(), "sub".to_string()]);
        sub.add_unit(Unit::new("deep", sub.path.clone(), "Deep"));
        menu.add_group(sub);
        menu.add_unit(Unit::new("title", menu.path.clone(), "Title"));
        file.root.add_group(menu);
        file.root.add_unit(Unit::new("top", Vec::new(), "Top"));

        let json = FlatJson.export(&[file]).unwrap();
        assert_eq!(
            json,
            indoc! {r#"
                {
                  "menu.sub.deep": "Deep",
                  "menu.title": "Title",
                  "top": "Top"
                }
            "#}
        );
    }

    #[test]
    fn test_export_derived_skips_empty_targets() {
        let mut file = TranslationFile::new("fr_fr", BASELINE_LOCALE, Some("fr-FR".to_string()));
        file.root
            .add_unit(Unit::new("a", Vec::new(), "A").with_target("Ah"));
        file.root.add_unit(Unit::new("b", Vec::new(), "B").with_target(""));
        file.root.add_unit(Unit::new("c", Vec::new(), "C"));

        let format = Format::from_files(&[file]);
        assert_eq!(format.locale, "fr-FR");
        assert_eq!(format.entries.len(), 1);
        assert_eq!(format.entries["a"], "Ah");
    }

    #[test]
    fn test_export_earlier_files_win() {
        let mut first = TranslationFile::new("en_us", BASELINE_LOCALE, None);
        first.root.add_unit(Unit::new("shared", Vec::new(), "first"));
        let mut second = TranslationFile::new("en_us", BASELINE_LOCALE, None);
        second.root.add_unit(Unit::new("shared", Vec::new(), "second"));
        second.root.add_unit(Unit::new("only", Vec::new(), "second only"));

        let format = Format::from_files(&[first, second]);
        assert_eq!(format.entries["shared"], "first");
        assert_eq!(format.entries["only"], "second only");
    }

    #[test]
    fn test_round_trip_keeps_key_order() {
        let (baseline, _) = import("en_us", BASELINE, &[]);
        let json = FlatJson.export(&[baseline]).unwrap();
        assert_eq!(json, BASELINE);
    }

    #[test]
    fn test_export_with_tabs() {
        let mut file = TranslationFile::new("en_us", BASELINE_LOCALE, None);
        file.root.add_unit(Unit::new("a", Vec::new(), "A"));
        let json = FlatJson
            .export_with_options(&[file], &ExportOptions::new().with_tabs(true))
            .unwrap();
        assert_eq!(json, "{\n\t\"a\": \"A\"\n}\n");
    }

    #[test]
    fn test_parser_read_from_takes_locale_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de_de.json");
        std::fs::write(&path, r#"{"a": "b"}"#).unwrap();

        let format = Format::read_from(&path).unwrap();
        assert_eq!(format.locale, "de-DE");
        assert!(!format.is_baseline());
        assert_eq!(format.entries["a"], "b");
    }
}
