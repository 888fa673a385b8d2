// crates/mcs-core/src/xml.rs
// ============================================================================
// Module: XML Storage Format
// Description: Single-column XML serialization of multicultural strings.
// Purpose: Produce and read the exact stored text the persistence engine sees.
// Dependencies: crate::{culture, value}, quick-xml, thiserror
// ============================================================================

//! ## Overview
//! A value is stored as one XML document:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?><MultiCulturalString p1:type="MultiCulturalString"
//!   xmlns:p1="http://www.w3.org/2001/XMLSchema-instance" xmlns="http://custis.ru/i18n">
//!   <ru>Тест</ru><en>Test</en></MultiCulturalString>
//! ```
//!
//! (shown wrapped; the real output has no whitespace between nodes). One
//! child element per culture, named by the culture identifier, in insertion
//! order. Text escapes only `<`, `>` and `&`, so re-serializing a parsed
//! canonical document reproduces it byte-for-byte.

// ============================================================================
// SECTION: Imports
// ============================================================================

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use thiserror::Error;

use crate::culture::CultureError;
use crate::culture::CultureName;
use crate::value::MultiCulturalString;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default XML namespace of the root element.
pub const DEFAULT_NAMESPACE: &str = "http://custis.ru/i18n";
/// XML Schema instance namespace bound to the `p1` prefix.
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Root element name and declared type.
const ROOT_ELEMENT: &str = "MultiCulturalString";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// XML storage errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The invariant culture has no element name and cannot be stored.
    #[error("the invariant culture cannot be stored as an xml element")]
    InvariantCulture,
    /// Writing the document failed.
    #[error("xml write error: {0}")]
    Write(String),
    /// The stored text is not well-formed XML.
    #[error("xml parse error: {0}")]
    Parse(String),
    /// The root element is not `MultiCulturalString`.
    #[error("unexpected root element `{0}`")]
    UnexpectedRoot(String),
    /// A culture element contains nested elements.
    #[error("culture element `{0}` must contain text only")]
    NestedElement(String),
    /// A child element name is not a culture identifier.
    #[error("invalid culture element: {0}")]
    InvalidCulture(#[from] CultureError),
    /// The same culture appears twice.
    #[error("duplicate culture element `{0}`")]
    DuplicateCulture(String),
    /// No root element was found.
    #[error("missing root element")]
    MissingRoot,
    /// A text holds a character XML 1.0 does not allow.
    #[error("culture `{culture}` text holds character U+{code:04X} not allowed in xml")]
    InvalidCharacter {
        /// Culture whose text is rejected.
        culture: String,
        /// Code point of the offending character.
        code: u32,
    },
}

// ============================================================================
// SECTION: Formatter
// ============================================================================

/// Encoding label written into the XML declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlEncoding {
    /// `utf-8`.
    #[default]
    Utf8,
    /// `utf-16`, used by stores that persist the text as UTF-16.
    Utf16,
}

impl XmlEncoding {
    /// Returns the declaration label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
        }
    }
}

/// Serializer/deserializer for the stored XML form.
///
/// # Invariants
/// - `namespace` is written verbatim as the default namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFormatter {
    /// Default namespace of the root element.
    namespace: String,
    /// Declared encoding label.
    encoding: XmlEncoding,
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl XmlFormatter {
    /// Creates a formatter for the given namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            encoding: XmlEncoding::default(),
        }
    }

    /// Sets the declared encoding label.
    #[must_use]
    pub fn with_encoding(mut self, encoding: XmlEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Returns the configured namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Serializes a value to its stored text.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvariantCulture`] when the value holds an
    /// invariant-culture entry, [`XmlError::InvalidCharacter`] when a text
    /// cannot be represented in XML 1.0, or [`XmlError::Write`] on writer
    /// failure.
    pub fn serialize(&self, value: &MultiCulturalString) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some(self.encoding.label()), None)))?;
        let mut root = BytesStart::new(ROOT_ELEMENT);
        root.push_attribute(("p1:type", ROOT_ELEMENT));
        root.push_attribute(("xmlns:p1", XSI_NAMESPACE));
        root.push_attribute(("xmlns", self.namespace.as_str()));
        write(&mut writer, Event::Start(root))?;
        for (culture, text) in value.iter() {
            if culture.is_invariant() {
                return Err(XmlError::InvariantCulture);
            }
            if let Some(character) = text.chars().find(|ch| !is_xml_char(*ch)) {
                return Err(XmlError::InvalidCharacter {
                    culture: culture.as_str().to_string(),
                    code: u32::from(character),
                });
            }
            write(&mut writer, Event::Start(BytesStart::new(culture.as_str())))?;
            write(&mut writer, Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            write(&mut writer, Event::End(BytesEnd::new(culture.as_str())))?;
        }
        write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        String::from_utf8(writer.into_inner()).map_err(|err| XmlError::Write(err.to_string()))
    }

    /// Parses stored text back into a value.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] when the text is malformed or violates the
    /// one-element-per-culture layout.
    pub fn deserialize(&self, text: &str) -> Result<MultiCulturalString, XmlError> {
        let mut reader = Reader::from_str(text);
        let mut value = MultiCulturalString::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut current: Option<(CultureName, String)> = None;
        loop {
            let event = reader.read_event().map_err(|err| XmlError::Parse(err.to_string()))?;
            match event {
                Event::Start(element) => {
                    let name = local_name(&element)?;
                    depth += 1;
                    match depth {
                        1 => {
                            check_root(&name)?;
                            seen_root = true;
                        }
                        2 => current = Some((CultureName::parse(&name)?, String::new())),
                        _ => return Err(XmlError::NestedElement(name)),
                    }
                }
                Event::Empty(element) => {
                    let name = local_name(&element)?;
                    match depth {
                        0 => {
                            check_root(&name)?;
                            seen_root = true;
                        }
                        1 => insert(&mut value, CultureName::parse(&name)?, String::new())?,
                        _ => return Err(XmlError::NestedElement(name)),
                    }
                }
                Event::Text(raw) => {
                    if let Some((_, buffer)) = current.as_mut() {
                        let unescaped =
                            raw.unescape().map_err(|err| XmlError::Parse(err.to_string()))?;
                        buffer.push_str(&unescaped);
                    }
                }
                Event::CData(raw) => {
                    if let Some((_, buffer)) = current.as_mut() {
                        let decoded = std::str::from_utf8(&raw)
                            .map_err(|err| XmlError::Parse(err.to_string()))?;
                        buffer.push_str(decoded);
                    }
                }
                Event::End(_) => {
                    if depth == 2
                        && let Some((culture, text)) = current.take()
                    {
                        insert(&mut value, culture, text)?;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if seen_root { Ok(value) } else { Err(XmlError::MissingRoot) }
    }

    /// Converts an optional value into its stored column text.
    ///
    /// `None` is stored as a null column.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] when serialization fails.
    pub fn to_stored(&self, value: Option<&MultiCulturalString>) -> Result<Option<String>, XmlError> {
        value.map(|value| self.serialize(value)).transpose()
    }

    /// Reads an optional stored column text.
    ///
    /// Null, empty and whitespace-only column values read as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] when a non-blank value fails to parse.
    pub fn from_stored(&self, stored: Option<&str>) -> Result<Option<MultiCulturalString>, XmlError> {
        match stored {
            Some(text) if !text.trim().is_empty() => self.deserialize(text).map(Some),
            _ => Ok(None),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes one event, mapping writer failures.
fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer.write_event(event).map_err(|err| XmlError::Write(err.to_string()))
}

/// Returns the local (prefix-free) name of an element.
fn local_name(element: &BytesStart<'_>) -> Result<String, XmlError> {
    let name = element.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|err| XmlError::Parse(err.to_string()))
}

/// Returns true for characters of the XML 1.0 `Char` production.
const fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Rejects documents whose root is not the multicultural string element.
fn check_root(name: &str) -> Result<(), XmlError> {
    if name == ROOT_ELEMENT { Ok(()) } else { Err(XmlError::UnexpectedRoot(name.to_string())) }
}

/// Inserts a parsed entry, rejecting duplicate cultures.
fn insert(
    value: &mut MultiCulturalString,
    culture: CultureName,
    text: String,
) -> Result<(), XmlError> {
    if value.get_exact(culture.as_str()).is_some() {
        return Err(XmlError::DuplicateCulture(culture.into()));
    }
    value.set(culture, text);
    Ok(())
}
