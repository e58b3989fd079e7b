//! Support for XLIFF 1.2 documents.
//!
//! The reader buffers the quick-xml event stream into a small element tree and then
//! walks it into the [`crate::types`] model. Every attribute the model does not give a
//! field of its own is kept in the owning entity's attribute bag and replayed on write,
//! so unknown vendor attributes survive a round trip.
//!
//! Inline markup inside `<source>`/`<target>` (`<g>`, `<x/>`, ...) is flattened to its
//! text content.

use std::{
    collections::HashSet,
    io::{BufRead, Write},
    path::Path,
};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    codec,
    diagnostics::{Diagnostics, Warning},
    error::Error,
    formats::FormatType,
    options::ExportOptions,
    traits::{ImportContext, Parser, TranslationFormat},
    types::{
        Attributes, Context, ContextGroup, ContextGroupPurpose, ExternalFile, FileReference,
        Group, Header, InternalFile, Match, Note, NoteAnnotates, PATH_SEPARATOR, Segment,
        TranslationFile, Unit,
    },
};

/// The version this module reads and writes.
pub const VERSION: &str = "1.2";

/// Appended to an identifier that collides with a sibling's.
pub const DUPLICATE_SUFFIX: &str = "-XL-DUPLICATED";

const NAMESPACE_PREFIX: &str = "urn:oasis:names:tc:xliff:document:";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "urn:oasis:names:tc:xliff:document:1.2 http://docs.oasis-open.org/xliff/v1.2/os/xliff-core-1.2-strict.xsd";

/// Root attributes regenerated from the model on export.
const ROOT_ATTRIBUTES: [&str; 4] = ["version", "xmlns", "xmlns:xsi", "xsi:schemaLocation"];

/// A parsed XLIFF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Value of the root `version` attribute.
    pub version: String,
    pub files: Vec<TranslationFile>,
    /// Fix-ups applied while parsing (renamed duplicates).
    pub warnings: Vec<Warning>,
}

impl Format {
    pub fn new(files: Vec<TranslationFile>) -> Self {
        Self {
            version: VERSION.to_string(),
            files,
            warnings: Vec::new(),
        }
    }

    /// Parses a document imported under `name`.
    ///
    /// `name` becomes every file's `filename`, and its `original` when the
    /// `<file>` element has none.
    pub fn from_reader_named<R: BufRead>(reader: R, name: &str) -> Result<Self, Error> {
        let document = read_document(reader)?;
        let mut diagnostics = Diagnostics::new();

        let xliff = document
            .child("xliff")
            .ok_or_else(|| Error::structure("no <xliff> root element"))?;

        let version = xliff.attribute("version").unwrap_or(VERSION).to_string();
        check_version(&version)?;

        let document_attributes = xliff.other_attributes(&ROOT_ATTRIBUTES);
        let files = xliff
            .children_named("file")
            .map(|file| {
                let mut file = parse_file(file, name, &mut diagnostics)?;
                file.document_attributes = document_attributes.clone();
                Ok(file)
            })
            .collect::<Result<Vec<_>, Error>>()?;
        if files.is_empty() {
            return Err(Error::structure("<xliff> contains no <file> element"));
        }

        Ok(Format {
            version,
            files,
            warnings: diagnostics.into_warnings(),
        })
    }

    /// Parses a document held in memory.
    pub fn parse(name: &str, text: &str) -> Result<Self, Error> {
        Self::from_reader_named(text.as_bytes(), name)
    }

    pub fn to_writer_with_options<W: Write>(
        &self,
        writer: W,
        options: &ExportOptions,
    ) -> Result<(), Error> {
        write_document(writer, &self.version, &self.files, options)
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Self::from_reader_named(reader, "")
    }

    /// Reads a file, honoring a UTF-8/UTF-16 byte order mark. The file stem is used as
    /// the import name.
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

/// Registry entry for XLIFF 1.2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xliff12;

impl TranslationFormat for Xliff12 {
    fn format_type(&self) -> FormatType {
        FormatType::Xliff12
    }

    fn import(
        &self,
        name: &str,
        text: &str,
        context: &mut ImportContext<'_>,
    ) -> Result<Vec<TranslationFile>, Error> {
        let format = Format::parse(name, text)?;
        context.extend(format.warnings);
        Ok(format.files)
    }

    fn export_with_options(
        &self,
        files: &[TranslationFile],
        options: &ExportOptions,
    ) -> Result<String, Error> {
        let mut out = Vec::new();
        write_document(&mut out, VERSION, files, options)?;
        String::from_utf8(out).map_err(|e| Error::InvalidResource(e.to_string()))
    }
}

/// Rejects documents declaring a version newer than 1.2.
///
/// A missing or non-numeric version is let through.
fn check_version(version: &str) -> Result<(), Error> {
    match version.trim().parse::<f64>() {
        Ok(number) if number > 1.2 => Err(Error::UnsupportedVersion(version.to_string())),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Element tree

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Attributes,
    children: Vec<Content>,
}

#[derive(Debug)]
enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    fn from_start(start: &BytesStart) -> Result<Self, Error> {
        let mut attributes = Attributes::new();
        for attr in start.attributes().with_checks(false) {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
        })
    }

    /// Name without namespace prefix.
    fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn required_attribute(&self, name: &str) -> Result<&str, Error> {
        self.attribute(name).ok_or_else(|| {
            Error::structure(format!("<{}> is missing the `{}` attribute", self.name, name))
        })
    }

    /// Attributes other than `known`, in document order.
    fn other_attributes(&self, known: &[&str]) -> Attributes {
        self.attributes
            .iter()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .cloned()
            .collect()
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements()
            .filter(move |element| element.local_name() == name)
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.local_name() == name)
    }

    /// Concatenated text of this element and all its descendants.
    fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.children {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Buffers the whole document into an [`Element`] tree under a nameless document node.
fn read_document<R: BufRead>(reader: R) -> Result<Element, Error> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack = vec![Element::default()];

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => stack.push(Element::from_start(e)?),
            Event::Empty(ref e) => {
                let element = Element::from_start(e)?;
                push_content(&mut stack, Content::Element(element))?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .filter(|_| !stack.is_empty())
                    .ok_or_else(|| Error::structure("unbalanced closing tag"))?;
                push_content(&mut stack, Content::Element(element))?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                push_content(&mut stack, Content::Text(text))?;
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|e| Error::structure(format!("CDATA is not UTF-8: {}", e)))?;
                push_content(&mut stack, Content::Text(text))?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(document), true) => Ok(document),
        _ => Err(Error::structure("unexpected end of document")),
    }
}

fn push_content(stack: &mut [Element], content: Content) -> Result<(), Error> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| Error::structure("content outside of the document"))?;
    parent.children.push(content);
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading

fn parse_file(
    element: &Element,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<TranslationFile, Error> {
    let source_language = element.required_attribute("source-language")?;
    let target_language = element.attribute("target-language").map(str::to_string);

    let mut file = TranslationFile::new(name, source_language, target_language);
    file.original = element.attribute("original").unwrap_or(name).to_string();
    file.attributes = element.other_attributes(&["original", "source-language", "target-language"]);
    file.header = element.child("header").map(parse_header).transpose()?;

    let body = element.child("body").ok_or_else(|| {
        Error::structure(format!("<file original=\"{}\"> has no <body>", file.original))
    })?;
    parse_group_contents(body, &mut file.root, diagnostics)?;

    Ok(file)
}

/// Fills `group` from the `<group>`/`<trans-unit>` children of `element`.
fn parse_group_contents(
    element: &Element,
    group: &mut Group,
    diagnostics: &mut Diagnostics,
) -> Result<(), Error> {
    let mut group_ids = HashSet::new();
    let mut unit_ids = HashSet::new();

    for child in element.elements() {
        match child.local_name() {
            "group" => {
                let id = child.required_attribute("id")?.to_string();
                let id = unique_id(id, &mut group_ids, &group.path, diagnostics);

                let mut path = group.path.clone();
                path.push(id.clone());
                let mut nested = Group::new(id, path);
                nested.attributes = child.other_attributes(&["id"]);
                parse_group_contents(child, &mut nested, diagnostics)?;
                group.add_group(nested);
            }
            "trans-unit" => {
                let mut unit = parse_unit(child, group.path.clone())?;
                unit.id = unique_id(unit.id, &mut unit_ids, &group.path, diagnostics);
                group.add_unit(unit);
            }
            _ => {}
        }
    }
    Ok(())
}

/// Returns `id`, suffixed until it differs from every identifier already in `seen`.
fn unique_id(
    id: String,
    seen: &mut HashSet<String>,
    parent_path: &[String],
    diagnostics: &mut Diagnostics,
) -> String {
    if seen.insert(id.clone()) {
        return id;
    }

    let mut renamed = id.clone();
    while seen.contains(&renamed) {
        renamed.push_str(DUPLICATE_SUFFIX);
    }
    seen.insert(renamed.clone());

    let mut path = parent_path.to_vec();
    path.push(id);
    diagnostics.warn(Warning::DuplicateIdentifier {
        path: path.join(PATH_SEPARATOR),
        renamed_to: renamed.clone(),
    });
    renamed
}

fn parse_unit(element: &Element, path: Vec<String>) -> Result<Unit, Error> {
    let id = element.required_attribute("id")?;
    let source = element
        .child("source")
        .map(parse_segment)
        .ok_or_else(|| Error::structure(format!("<trans-unit id=\"{}\"> has no <source>", id)))?;

    let mut unit = Unit::new(id, path, source);
    unit.target = element.child("target").map(parse_segment);
    unit.notes = element.children_named("note").map(parse_note).collect();
    unit.context_groups = element
        .children_named("context-group")
        .map(parse_context_group)
        .collect::<Result<_, _>>()?;
    unit.matches = element
        .children_named("alt-trans")
        .map(parse_match)
        .collect::<Result<_, _>>()?;
    unit.attributes = element.other_attributes(&["id"]);
    Ok(unit)
}

fn parse_segment(element: &Element) -> Segment {
    Segment {
        text: element.text(),
        attributes: element.attributes.clone(),
    }
}

fn parse_note(element: &Element) -> Note {
    let mut known = vec!["from"];

    let priority = element.attribute("priority").and_then(|p| p.trim().parse::<i32>().ok());
    if priority.is_some() {
        known.push("priority");
    }
    let annotates = element
        .attribute("annotates")
        .and_then(|a| a.parse::<NoteAnnotates>().ok());
    if annotates.is_some() {
        known.push("annotates");
    }

    Note {
        from: element
            .attribute("from")
            .filter(|from| !from.is_empty())
            .map(str::to_string),
        content: element.text(),
        priority: priority.unwrap_or_default(),
        annotates: annotates.unwrap_or_default(),
        // Values we could not interpret stay in the bag.
        attributes: element.other_attributes(&known),
    }
}

fn parse_context_group(element: &Element) -> Result<ContextGroup, Error> {
    let contexts = element
        .children_named("context")
        .map(|context| -> Result<Context, Error> {
            let context_type = context.required_attribute("context-type")?;
            Ok(Context {
                context_type: context_type.into(),
                content: context.text(),
                attributes: context.other_attributes(&["context-type"]),
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(ContextGroup {
        purpose: element.attribute("purpose").map(ContextGroupPurpose::from),
        contexts,
        attributes: element.other_attributes(&["purpose"]),
    })
}

fn parse_match(element: &Element) -> Result<Match, Error> {
    let source = element
        .child("source")
        .map(parse_segment)
        .ok_or_else(|| Error::structure("<alt-trans> has no <source>"))?;

    Ok(Match {
        source,
        target: element.child("target").map(parse_segment),
        notes: element.children_named("note").map(parse_note).collect(),
        context_groups: element
            .children_named("context-group")
            .map(parse_context_group)
            .collect::<Result<_, _>>()?,
        attributes: element.attributes.clone(),
    })
}

fn parse_header(element: &Element) -> Result<Header, Error> {
    Ok(Header {
        skl: element.child("skl").map(parse_reference).transpose()?,
        glossaries: element
            .children_named("glossary")
            .map(parse_reference)
            .collect::<Result<_, _>>()?,
        references: element
            .children_named("reference")
            .map(parse_reference)
            .collect::<Result<_, _>>()?,
        notes: element.children_named("note").map(parse_note).collect(),
        attributes: element.attributes.clone(),
    })
}

fn parse_reference(element: &Element) -> Result<FileReference, Error> {
    let internal_file = element.child("internal-file").map(|internal| InternalFile {
        content: internal.text(),
        form: internal.attribute("form").map(str::to_string),
        crc: internal.attribute("crc").map(str::to_string),
        attributes: internal.other_attributes(&["form", "crc"]),
    });

    let external_file = element
        .child("external-file")
        .map(|external| {
            Ok::<_, Error>(ExternalFile {
                href: external.required_attribute("href")?.to_string(),
                uid: external.attribute("uid").map(str::to_string),
                crc: external.attribute("crc").map(str::to_string),
                attributes: external.other_attributes(&["href", "uid", "crc"]),
            })
        })
        .transpose()?;

    Ok(FileReference {
        internal_file,
        external_file,
        attributes: element.attributes.clone(),
    })
}

// ---------------------------------------------------------------------------
// Writing

fn write_document<W: Write>(
    writer: W,
    version: &str,
    files: &[TranslationFile],
    options: &ExportOptions,
) -> Result<(), Error> {
    let mut xml_writer = Writer::new_with_indent(writer, options.indent_char(), options.indent_size());

    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let namespace = format!("{}{}", NAMESPACE_PREFIX, version);
    let mut root = BytesStart::new("xliff");
    root.push_attribute(("version", version));
    root.push_attribute(("xmlns", namespace.as_str()));
    if version == VERSION {
        root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    }
    push_attributes(&mut root, &document_attributes(files), &ROOT_ATTRIBUTES);
    xml_writer.write_event(Event::Start(root))?;

    for file in files {
        write_file(&mut xml_writer, file)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("xliff")))?;
    xml_writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Root attributes carried by `files`; the first file declaring a name wins.
fn document_attributes(files: &[TranslationFile]) -> Attributes {
    let mut merged = Attributes::new();
    for (key, value) in files.iter().flat_map(|file| &file.document_attributes) {
        if !merged.iter().any(|(seen, _)| seen == key) {
            merged.push((key.clone(), value.clone()));
        }
    }
    merged
}

/// Adds `attributes` to `start`, skipping names the caller already wrote.
fn push_attributes(start: &mut BytesStart, attributes: &Attributes, written: &[&str]) {
    for (key, value) in attributes {
        if !written.contains(&key.as_str()) {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// Writes `<name>text</name>`, keeping an empty element as an explicit open/close pair.
fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    start: BytesStart,
    text: &str,
) -> Result<(), Error> {
    let end = start.to_end().into_owned();
    xml_writer.write_event(Event::Start(start))?;
    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
    xml_writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_file<W: Write>(xml_writer: &mut Writer<W>, file: &TranslationFile) -> Result<(), Error> {
    let mut start = BytesStart::new("file");
    start.push_attribute(("original", file.original.as_str()));
    start.push_attribute(("source-language", file.source_language.as_str()));
    if let Some(target_language) = &file.target_language {
        start.push_attribute(("target-language", target_language.as_str()));
    }
    push_attributes(
        &mut start,
        &file.attributes,
        &["original", "source-language", "target-language"],
    );
    xml_writer.write_event(Event::Start(start))?;

    if let Some(header) = file.header.as_ref().filter(|header| !header.is_empty()) {
        write_header(xml_writer, header)?;
    }

    xml_writer.write_event(Event::Start(BytesStart::new("body")))?;
    write_group_contents(xml_writer, &file.root)?;
    xml_writer.write_event(Event::End(BytesEnd::new("body")))?;

    xml_writer.write_event(Event::End(BytesEnd::new("file")))?;
    Ok(())
}

fn write_group_contents<W: Write>(xml_writer: &mut Writer<W>, group: &Group) -> Result<(), Error> {
    for nested in &group.groups {
        let mut start = BytesStart::new("group");
        start.push_attribute(("id", nested.id.as_str()));
        push_attributes(&mut start, &nested.attributes, &["id"]);
        xml_writer.write_event(Event::Start(start))?;
        write_group_contents(xml_writer, nested)?;
        xml_writer.write_event(Event::End(BytesEnd::new("group")))?;
    }
    for unit in &group.units {
        write_unit(xml_writer, unit)?;
    }
    Ok(())
}

fn write_unit<W: Write>(xml_writer: &mut Writer<W>, unit: &Unit) -> Result<(), Error> {
    let mut start = BytesStart::new("trans-unit");
    start.push_attribute(("id", unit.id.as_str()));
    push_attributes(&mut start, &unit.attributes, &["id"]);
    xml_writer.write_event(Event::Start(start))?;

    write_segment(xml_writer, "source", &unit.source)?;
    if let Some(target) = &unit.target {
        write_segment(xml_writer, "target", target)?;
    }
    for note in &unit.notes {
        write_note(xml_writer, note)?;
    }
    for context_group in &unit.context_groups {
        write_context_group(xml_writer, context_group)?;
    }
    for alt in &unit.matches {
        write_match(xml_writer, alt)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
    Ok(())
}

fn write_segment<W: Write>(
    xml_writer: &mut Writer<W>,
    name: &str,
    segment: &Segment,
) -> Result<(), Error> {
    let mut start = BytesStart::new(name);
    push_attributes(&mut start, &segment.attributes, &[]);
    write_text_element(xml_writer, start, &segment.text)
}

/// Attributes equal to their defaults are left out.
fn write_note<W: Write>(xml_writer: &mut Writer<W>, note: &Note) -> Result<(), Error> {
    let mut start = BytesStart::new("note");
    if let Some(from) = note.from.as_deref().filter(|from| !from.is_empty()) {
        start.push_attribute(("from", from));
    }
    let priority = note.priority.to_string();
    if note.priority != 0 {
        start.push_attribute(("priority", priority.as_str()));
    }
    if note.annotates != NoteAnnotates::General {
        start.push_attribute(("annotates", note.annotates.as_str()));
    }
    push_attributes(&mut start, &note.attributes, &["from", "priority", "annotates"]);
    write_text_element(xml_writer, start, &note.content)
}

fn write_context_group<W: Write>(
    xml_writer: &mut Writer<W>,
    context_group: &ContextGroup,
) -> Result<(), Error> {
    let mut start = BytesStart::new("context-group");
    if let Some(purpose) = &context_group.purpose {
        start.push_attribute(("purpose", purpose.as_str()));
    }
    push_attributes(&mut start, &context_group.attributes, &["purpose"]);
    xml_writer.write_event(Event::Start(start))?;

    for context in &context_group.contexts {
        let mut start = BytesStart::new("context");
        start.push_attribute(("context-type", context.context_type.as_str()));
        push_attributes(&mut start, &context.attributes, &["context-type"]);
        write_text_element(xml_writer, start, &context.content)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("context-group")))?;
    Ok(())
}

fn write_match<W: Write>(xml_writer: &mut Writer<W>, alt: &Match) -> Result<(), Error> {
    let mut start = BytesStart::new("alt-trans");
    push_attributes(&mut start, &alt.attributes, &[]);
    xml_writer.write_event(Event::Start(start))?;

    write_segment(xml_writer, "source", &alt.source)?;
    if let Some(target) = &alt.target {
        write_segment(xml_writer, "target", target)?;
    }
    for note in &alt.notes {
        write_note(xml_writer, note)?;
    }
    for context_group in &alt.context_groups {
        write_context_group(xml_writer, context_group)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("alt-trans")))?;
    Ok(())
}

fn write_header<W: Write>(xml_writer: &mut Writer<W>, header: &Header) -> Result<(), Error> {
    let mut start = BytesStart::new("header");
    push_attributes(&mut start, &header.attributes, &[]);
    xml_writer.write_event(Event::Start(start))?;

    if let Some(skl) = &header.skl {
        write_reference(xml_writer, "skl", skl)?;
    }
    for glossary in &header.glossaries {
        write_reference(xml_writer, "glossary", glossary)?;
    }
    for reference in &header.references {
        write_reference(xml_writer, "reference", reference)?;
    }
    for note in &header.notes {
        write_note(xml_writer, note)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("header")))?;
    Ok(())
}

fn write_reference<W: Write>(
    xml_writer: &mut Writer<W>,
    name: &str,
    reference: &FileReference,
) -> Result<(), Error> {
    let mut start = BytesStart::new(name);
    push_attributes(&mut start, &reference.attributes, &[]);
    xml_writer.write_event(Event::Start(start))?;

    if let Some(internal) = &reference.internal_file {
        let mut start = BytesStart::new("internal-file");
        if let Some(form) = &internal.form {
            start.push_attribute(("form", form.as_str()));
        }
        if let Some(crc) = &internal.crc {
            start.push_attribute(("crc", crc.as_str()));
        }
        push_attributes(&mut start, &internal.attributes, &["form", "crc"]);
        write_text_element(xml_writer, start, &internal.content)?;
    }

    if let Some(external) = &reference.external_file {
        let mut start = BytesStart::new("external-file");
        start.push_attribute(("href", external.href.as_str()));
        if let Some(uid) = &external.uid {
            start.push_attribute(("uid", uid.as_str()));
        }
        if let Some(crc) = &external.crc {
            start.push_attribute(("crc", crc.as_str()));
        }
        push_attributes(&mut start, &external.attributes, &["href", "uid", "crc"]);
        xml_writer.write_event(Event::Empty(start))?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
