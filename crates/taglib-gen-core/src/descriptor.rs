//! Documentation extraction from Jelly tag files.
//!
//! A tag file documents itself with an `<st:documentation>` element placed
//! directly under its root element, where `st` is bound to `jelly:stapler`.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use tracing::debug;

use crate::error::{GenError, GenResult, MarkupError};

/// Namespace URI of the documentation element.
pub const STAPLER_NAMESPACE: &str = "jelly:stapler";

/// Local name of the documentation element.
pub const DOCUMENTATION_ELEMENT: &str = "documentation";

/// Anything that can supply the documentation of a tag file.
pub trait DescriptorSource {
    /// Documentation text of `tag_file`, or `None` when it has none.
    fn documentation(&self, tag_file: &Path) -> GenResult<Option<String>>;
}

/// Reads tag files from disk and parses them as XML.
#[derive(Debug, Default, Clone, Copy)]
pub struct JellyDescriptorExtractor;

impl DescriptorSource for JellyDescriptorExtractor {
    fn documentation(&self, tag_file: &Path) -> GenResult<Option<String>> {
        let content = std::fs::read(tag_file)
            .map_err(|e| GenError::io("Failed to read tag file", tag_file, e))?;
        let documentation =
            extract_documentation(&content).map_err(|e| GenError::parse(tag_file, e))?;
        debug!(
            tag = %tag_file.display(),
            documented = documentation.is_some(),
            "Read tag descriptor"
        );
        Ok(documentation)
    }
}

/// Extract the documentation text from raw tag file bytes.
///
/// The character encoding is taken from a byte order mark or the XML
/// declaration, defaulting to UTF-8.
pub fn extract_documentation(xml: &[u8]) -> Result<Option<String>, MarkupError> {
    scan(NsReader::from_reader(xml))
}

/// Extract the documentation text from an in-memory tag file.
///
/// The whole document is read so that malformed markup after the
/// documentation element is still reported. Text is returned exactly as
/// written (entities decoded, CDATA included), without the text of any
/// nested elements.
pub fn extract_documentation_from_str(xml: &str) -> Result<Option<String>, MarkupError> {
    scan(NsReader::from_str(xml))
}

fn scan(mut reader: NsReader<&[u8]>) -> Result<Option<String>, MarkupError> {
    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut capturing: Option<String> = None;
    let mut documentation: Option<String> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                check_bound(&ns)?;
                if open.is_empty() {
                    if seen_root {
                        return Err(MarkupError::MultipleRoots(name));
                    }
                    seen_root = true;
                }
                if open.len() == 1
                    && documentation.is_none()
                    && capturing.is_none()
                    && is_documentation(&ns, e.local_name().as_ref())
                {
                    capturing = Some(String::new());
                }
                open.push(name);
            }
            Event::Empty(e) => {
                check_bound(&ns)?;
                if open.is_empty() {
                    if seen_root {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        return Err(MarkupError::MultipleRoots(name));
                    }
                    seen_root = true;
                }
                if open.len() == 1
                    && documentation.is_none()
                    && capturing.is_none()
                    && is_documentation(&ns, e.local_name().as_ref())
                {
                    documentation = Some(String::new());
                }
            }
            Event::End(_) => {
                open.pop();
                if open.len() == 1 {
                    if let Some(text) = capturing.take() {
                        documentation = Some(text);
                    }
                }
            }
            Event::Text(t) => {
                if open.is_empty() {
                    if t.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(MarkupError::TextOutsideRoot);
                    }
                } else if open.len() == 2 {
                    if let Some(buf) = capturing.as_mut() {
                        buf.push_str(&t.unescape().map_err(quick_xml::Error::from)?);
                    }
                }
            }
            Event::CData(c) => {
                if open.is_empty() {
                    return Err(MarkupError::TextOutsideRoot);
                }
                if open.len() == 2 {
                    if let Some(buf) = capturing.as_mut() {
                        let text = reader.decoder().decode(&c).map_err(quick_xml::Error::from)?;
                        buf.push_str(&text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.pop() {
        return Err(MarkupError::Unclosed(name));
    }
    if !seen_root {
        return Err(MarkupError::MissingRoot);
    }
    Ok(documentation)
}

fn is_documentation(ns: &ResolveResult<'_>, local_name: &[u8]) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == STAPLER_NAMESPACE.as_bytes())
        && local_name == DOCUMENTATION_ELEMENT.as_bytes()
}

fn check_bound(ns: &ResolveResult<'_>) -> Result<(), MarkupError> {
    match ns {
        ResolveResult::Unknown(prefix) => Err(MarkupError::UnboundPrefix(
            String::from_utf8_lossy(prefix).into_owned(),
        )),
        _ => Ok(()),
    }
}
