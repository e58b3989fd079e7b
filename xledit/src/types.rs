//! Core, format-agnostic document model for xledit.
//! Parsers decode into these; encoders serialize these.
//!
//! The tree is strictly owned top-down: a [`TranslationFile`] owns its root [`Group`],
//! a group owns its child groups and units. Nothing points back at its parent; an
//! entity's position is carried as a path of group identifiers instead.
//!
//! # Path convention
//!
//! A [`Group`]'s `path` *includes* its own identifier, while a [`Unit`]'s `path`
//! *excludes* its own identifier (it is the path of the containing group). The tree
//! utilities in [`crate::tree`] rely on that difference: inserting a group consumes one
//! segment fewer than inserting a unit.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Ordered `(name, value)` pairs of XML attributes the model does not interpret.
///
/// Captured on import and replayed verbatim on export.
pub type Attributes = Vec<(String, String)>;

/// Identifier of the implicit top-level group every file owns.
pub const ROOT_GROUP_ID: &str = "Root";

/// Separator used by [`Unit::full_path_str`].
pub const PATH_SEPARATOR: &str = "/";

/// Looks up an attribute by name in an attribute bag.
pub fn find_attribute<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Finds the source file `file` was derived from: the first source file in `files`
/// with the same source language.
pub fn originating_file<'a>(
    files: &'a [TranslationFile],
    file: &TranslationFile,
) -> Option<&'a TranslationFile> {
    files
        .iter()
        .find(|candidate| candidate.is_source() && candidate.source_language == file.source_language)
}

/// `file` itself plus every file in `files` translating from `file`'s language.
pub fn derived_files<'a>(
    files: &'a [TranslationFile],
    file: &TranslationFile,
) -> Vec<&'a TranslationFile> {
    files
        .iter()
        .filter(|candidate| {
            *candidate == file || candidate.source_language == file.effective_language()
        })
        .collect()
}

/// One imported localization file: header metadata plus a tree of groups and units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationFile {
    /// Name the file was imported under (file name without extension).
    pub filename: String,

    pub source_language: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub target_language: Option<String>,

    /// Original resource identifier (`original` attribute in XLIFF).
    pub original: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub header: Option<Header>,

    pub root: Group,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,

    /// Extra attributes of the enclosing document root, such as `xmlns:*` declarations
    /// that prefixed attributes in this file rely on.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub document_attributes: Attributes,
}

impl TranslationFile {
    /// Creates an empty file with a fresh root group.
    pub fn new(
        filename: impl Into<String>,
        source_language: impl Into<String>,
        target_language: Option<String>,
    ) -> Self {
        let filename = filename.into();
        Self {
            original: filename.clone(),
            filename,
            source_language: source_language.into(),
            target_language,
            header: None,
            root: Group::root(),
            attributes: Attributes::new(),
            document_attributes: Attributes::new(),
        }
    }

    /// True when this file has no distinct target language.
    pub fn is_source(&self) -> bool {
        match &self.target_language {
            None => true,
            Some(target) => *target == self.source_language,
        }
    }

    /// The language this file's readable text is in: the target language when there is
    /// one, the source language otherwise.
    pub fn effective_language(&self) -> &str {
        self.target_language
            .as_deref()
            .unwrap_or(&self.source_language)
    }

    /// Creates a new file translating this one into `target_language`.
    ///
    /// The group/unit structure, notes and context are copied; every target is cleared.
    pub fn derive(&self, target_language: impl Into<String>) -> TranslationFile {
        TranslationFile {
            filename: self.filename.clone(),
            source_language: self.effective_language().to_string(),
            target_language: Some(target_language.into()),
            original: self.original.clone(),
            header: self.header.clone(),
            root: self.root.cleared_targets(),
            attributes: self.attributes.clone(),
            document_attributes: self.document_attributes.clone(),
        }
    }

    /// Number of units in the whole tree.
    pub fn unit_count(&self) -> usize {
        let mut count = 0;
        crate::tree::for_each(&self.root, &mut |node| {
            if let crate::tree::Node::Unit(_) = node {
                count += 1;
            }
        });
        count
    }
}

/// A named nesting level grouping related units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Group {
    pub id: String,

    /// Ancestor group identifiers followed by this group's own identifier.
    /// Empty for the root group.
    #[serde(default)]
    pub path: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub units: Vec<Unit>,

    #[serde(default)]
    pub is_root: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

impl Group {
    pub fn new(id: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            id: id.into(),
            path,
            groups: Vec::new(),
            units: Vec::new(),
            is_root: false,
            attributes: Attributes::new(),
        }
    }

    /// The implicit top-level group of a file.
    pub fn root() -> Self {
        Self {
            is_root: true,
            ..Self::new(ROOT_GROUP_ID, Vec::new())
        }
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Deep copy of this subtree with every unit's target removed.
    pub fn cleared_targets(&self) -> Group {
        Group {
            id: self.id.clone(),
            path: self.path.clone(),
            groups: self.groups.iter().map(Group::cleared_targets).collect(),
            units: self.units.iter().map(Unit::untranslated).collect(),
            is_root: self.is_root,
            attributes: self.attributes.clone(),
        }
    }
}

/// Text of a `<source>` or `<target>` element with the attributes it carried.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Segment {
    pub text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: Attributes::new(),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::new(value)
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::new(value)
    }
}

/// One translatable string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Unit {
    pub id: String,

    /// Identifiers of the enclosing groups, not including this unit's own identifier.
    #[serde(default)]
    pub path: Vec<String>,

    pub source: Segment,

    /// `None` means no `<target>` at all, which is different from an empty target.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub target: Option<Segment>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub context_groups: Vec<ContextGroup>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub matches: Vec<Match>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

impl Unit {
    pub fn new(id: impl Into<String>, path: Vec<String>, source: impl Into<Segment>) -> Self {
        Self {
            id: id.into(),
            path,
            source: source.into(),
            target: None,
            notes: Vec::new(),
            context_groups: Vec::new(),
            matches: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Sets the target text, keeping the attributes of an existing target.
    pub fn with_target(mut self, text: impl Into<String>) -> Self {
        self.set_target(text);
        self
    }

    pub fn set_target(&mut self, text: impl Into<String>) {
        match &mut self.target {
            Some(target) => target.text = text.into(),
            None => self.target = Some(Segment::new(text)),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source.text
    }

    /// Target text, `None` when the unit has no target element.
    pub fn target_text(&self) -> Option<&str> {
        self.target.as_ref().map(|target| target.text.as_str())
    }

    /// The unit's path followed by its own identifier.
    pub fn full_path(&self) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(self.id.clone());
        path
    }

    pub fn full_path_str(&self) -> String {
        self.full_path().join(PATH_SEPARATOR)
    }

    /// Notes ordered by priority; notes of equal priority keep their document order.
    pub fn sorted_notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort_by_key(|note| note.priority);
        notes
    }

    /// Copy of this unit without a target.
    pub fn untranslated(&self) -> Unit {
        Unit {
            target: None,
            ..self.clone()
        }
    }

    /// Derives the status from the `approved` attribute when present, otherwise from
    /// whether there is any target text.
    pub fn translation_status(&self) -> TranslationStatus {
        match find_attribute(&self.attributes, "approved") {
            Some("no") => TranslationStatus::NotApproved,
            Some("yes") => TranslationStatus::Translated,
            _ => match self.target_text() {
                None | Some("") => TranslationStatus::Untranslated,
                Some(_) => TranslationStatus::Translated,
            },
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unit {{ path: {}, source: {}, status: {} }}",
            self.full_path_str(),
            self.source.text,
            self.translation_status()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Untranslated,
    NotApproved,
    Translated,
}

impl Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationStatus::Untranslated => write!(f, "Not translated"),
            TranslationStatus::NotApproved => write!(f, "Not approved"),
            TranslationStatus::Translated => write!(f, "Translated"),
        }
    }
}

/// An alternate candidate translation (`<alt-trans>`). Not addressable by path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Match {
    pub source: Segment,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub target: Option<Segment>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub context_groups: Vec<ContextGroup>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

/// Which part of a unit a note refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAnnotates {
    Source,
    Target,
    #[default]
    General,
}

impl NoteAnnotates {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteAnnotates::Source => "source",
            NoteAnnotates::Target => "target",
            NoteAnnotates::General => "general",
        }
    }
}

impl FromStr for NoteAnnotates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "source" => Ok(NoteAnnotates::Source),
            "target" => Ok(NoteAnnotates::Target),
            "general" => Ok(NoteAnnotates::General),
            other => Err(format!("Unknown note annotation target: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Note {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub from: Option<String>,

    pub content: String,

    /// Sort key; lower comes first.
    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub annotates: NoteAnnotates,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

impl Note {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextGroupPurpose {
    Information,
    Location,
    Match,
    /// Extension or combined values (e.g. `x-debug`, `location match`), kept verbatim.
    Custom(String),
}

impl ContextGroupPurpose {
    pub fn as_str(&self) -> &str {
        match self {
            ContextGroupPurpose::Information => "information",
            ContextGroupPurpose::Location => "location",
            ContextGroupPurpose::Match => "match",
            ContextGroupPurpose::Custom(value) => value,
        }
    }
}

impl From<&str> for ContextGroupPurpose {
    fn from(value: &str) -> Self {
        match value {
            "information" => ContextGroupPurpose::Information,
            "location" => ContextGroupPurpose::Location,
            "match" => ContextGroupPurpose::Match,
            other => ContextGroupPurpose::Custom(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    Database,
    Element,
    ElementTitle,
    LineNumber,
    NumParams,
    ParamNotes,
    Record,
    RecordTitle,
    SourceFile,
    /// `x-` extension values, kept verbatim.
    Custom(String),
}

impl ContextType {
    pub fn as_str(&self) -> &str {
        match self {
            ContextType::Database => "database",
            ContextType::Element => "element",
            ContextType::ElementTitle => "elementtitle",
            ContextType::LineNumber => "linenumber",
            ContextType::NumParams => "numparams",
            ContextType::ParamNotes => "paramnotes",
            ContextType::Record => "record",
            ContextType::RecordTitle => "recordtitle",
            ContextType::SourceFile => "sourcefile",
            ContextType::Custom(value) => value,
        }
    }
}

impl From<&str> for ContextType {
    fn from(value: &str) -> Self {
        match value {
            "database" => ContextType::Database,
            "element" => ContextType::Element,
            "elementtitle" => ContextType::ElementTitle,
            "linenumber" => ContextType::LineNumber,
            "numparams" => ContextType::NumParams,
            "paramnotes" => ContextType::ParamNotes,
            "record" => ContextType::Record,
            "recordtitle" => ContextType::RecordTitle,
            "sourcefile" => ContextType::SourceFile,
            other => ContextType::Custom(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContextGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub purpose: Option<ContextGroupPurpose>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub contexts: Vec<Context>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Context {
    pub context_type: ContextType,
    pub content: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

/// File-level header (`<header>`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Header {
    /// Skeleton reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub skl: Option<FileReference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub glossaries: Vec<FileReference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub references: Vec<FileReference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

impl Header {
    pub fn is_empty(&self) -> bool {
        self.skl.is_none()
            && self.glossaries.is_empty()
            && self.references.is_empty()
            && self.notes.is_empty()
            && self.attributes.is_empty()
    }
}

/// Shared shape of `<skl>`, `<glossary>` and `<reference>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct FileReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub internal_file: Option<InternalFile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub external_file: Option<ExternalFile>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

/// Embedded file content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct InternalFile {
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub form: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub crc: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}

/// Reference to a file outside the document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ExternalFile {
    pub href: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub crc: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
}
