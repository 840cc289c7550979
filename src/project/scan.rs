//! Streaming project-file scanner and rewriter
//!
//! Walks a project document event-by-event:
//! - Every `PackageReference` element is collected as a dependency record
//!   and rewritten in place to carry only its name attribute
//! - Metadata children of a declaration are dropped wholesale
//! - All other markup passes through byte-for-byte, so a document without
//!   declarations (or one already stripped) round-trips unchanged

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

use crate::domain::{DottedVersion, PackageRecord};
use crate::error::DeclarationError;

/// Element tag that marks a dependency declaration
const DECLARATION_TAG: &[u8] = b"PackageReference";

/// Attribute carrying the dependency name
const NAME_ATTR: &str = "Include";

/// Attribute carrying the pinned version
const VERSION_ATTR: &str = "Version";

/// Structural XML failure; the whole project is dropped on this
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ScanError {
    message: String,
}

impl ScanError {
    fn new(message: impl Into<String>) -> Self {
        ScanError {
            message: message.into(),
        }
    }
}

/// Outcome of scanning one project document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScan {
    /// Well-formed dependency records, in encounter order
    pub records: Vec<PackageRecord>,
    /// The document with every declaration stripped to its name
    pub rewritten: String,
    /// Declaration elements encountered, well-formed or not
    pub declarations_seen: usize,
    /// Declarations that produced no record, with the reason for each
    pub skipped: Vec<DeclarationError>,
}

/// Scans project XML, collecting declarations and stripping them in place
pub fn scan_content(content: &str) -> Result<ProjectScan, ScanError> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Vec::new());
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut declarations_seen = 0;

    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Eof => break,
            Event::Empty(elem) if is_declaration(&elem) => {
                declarations_seen += 1;
                let stripped = strip_declaration(&elem, &mut records, &mut skipped)?;
                writer.write_event(Event::Empty(stripped)).map_err(xml_error)?;
            }
            Event::Start(elem) if is_declaration(&elem) => {
                declarations_seen += 1;
                let stripped = strip_declaration(&elem, &mut records, &mut skipped)?;
                skip_children(&mut reader)?;
                writer.write_event(Event::Empty(stripped)).map_err(xml_error)?;
            }
            other => writer.write_event(other).map_err(xml_error)?,
        }
    }

    let rewritten = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    Ok(ProjectScan {
        records,
        rewritten,
        declarations_seen,
        skipped,
    })
}

fn xml_error(error: impl std::fmt::Display) -> ScanError {
    ScanError::new(error.to_string())
}

fn is_declaration(elem: &BytesStart) -> bool {
    elem.name().as_ref().eq_ignore_ascii_case(DECLARATION_TAG)
}

/// Reads one declaration's attributes and builds its replacement element
///
/// The record (or the reason there is none) lands in `records`/`skipped`;
/// the returned element keeps the original tag spelling and only the name
/// attribute, which is the stripped form written back to the project.
fn strip_declaration(
    elem: &BytesStart,
    records: &mut Vec<PackageRecord>,
    skipped: &mut Vec<DeclarationError>,
) -> Result<BytesStart<'static>, ScanError> {
    let mut name: Option<String> = None;
    let mut version: Option<String> = None;
    let mut attributes: Vec<(String, String)> = Vec::new();

    for attr in elem.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        if key.eq_ignore_ascii_case(NAME_ATTR) {
            // first name attribute wins; duplicates would be invalid XML anyway
            if name.is_none() {
                name = Some(value);
            }
        } else if key.eq_ignore_ascii_case(VERSION_ATTR) {
            // last spelling wins when the version attribute repeats with
            // different casing
            version = Some(value);
        } else {
            attributes.push((key, value));
        }
    }

    match to_record(name.as_deref(), version.as_deref(), attributes) {
        Ok(record) => records.push(record),
        Err(reason) => skipped.push(reason),
    }

    let mut replacement = elem.to_owned();
    replacement.clear_attributes();
    if let Some(name) = name.as_deref() {
        replacement.push_attribute((NAME_ATTR, name));
    }
    Ok(replacement)
}

fn to_record(
    name: Option<&str>,
    version: Option<&str>,
    attributes: Vec<(String, String)>,
) -> Result<PackageRecord, DeclarationError> {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(DeclarationError::MissingName),
    };
    let version = version.ok_or_else(|| DeclarationError::missing_version(name))?;
    let parsed: DottedVersion = version
        .parse()
        .map_err(|_| DeclarationError::invalid_version(name, version))?;
    Ok(PackageRecord {
        name: name.to_string(),
        version: parsed,
        attributes,
    })
}

/// Consumes events up to and including the declaration's closing tag
fn skip_children(reader: &mut Reader<&[u8]>) -> Result<(), ScanError> {
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => return Err(ScanError::new("unclosed declaration element")),
            _ => {}
        }
    }
}
