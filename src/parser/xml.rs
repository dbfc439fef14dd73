//! Minimal owned XML element tree built on quick-xml
//!
//! VIRL files are small, so the whole document is read into memory and the
//! parser walks it with candidate lookups instead of streaming events.

use crate::error::SourceError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// One XML element with its namespace resolved
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Namespace URI, `None` for unqualified elements
    pub namespace: Option<String>,
    /// Local name without prefix
    pub name: String,
    /// Attributes in document order, keyed by their qualified name
    pub attributes: Vec<(String, String)>,
    /// Character data appearing before the first child element
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Value of an attribute, if present
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value among candidate attributes
    pub fn first_attr(&self, candidates: &[&str]) -> Option<&str> {
        candidates
            .iter()
            .filter_map(|key| self.attr(key))
            .find(|value| !value.is_empty())
    }

    /// Whether this element has the given namespace and local name
    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }
}

/// Parse a complete document and return its root element
pub fn parse_document(content: &str) -> Result<Element, SourceError> {
    let mut reader = NsReader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(start)) => {
                let element = open_element(ns, &start)?;
                stack.push(element);
            }
            (ns, Event::Empty(start)) => {
                let element = open_element(ns, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            (_, Event::End(end)) => {
                let element = stack.pop().ok_or_else(|| {
                    SourceError::Structure(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            (_, Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    if current.children.is_empty() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
            }
            (_, Event::CData(cdata)) => {
                if let Some(current) = stack.last_mut() {
                    if current.children.is_empty() {
                        current.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SourceError::Structure(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| SourceError::Structure("document has no root element".to_string()))
}

fn open_element(ns: ResolveResult, start: &BytesStart) -> Result<Element, SourceError> {
    let namespace = match ns {
        ResolveResult::Bound(uri) => Some(String::from_utf8_lossy(uri.as_ref()).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(SourceError::Structure(format!(
                "unbound namespace prefix '{}'",
                String::from_utf8_lossy(&prefix)
            )))
        }
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        namespace,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), SourceError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(SourceError::Structure(format!(
                "multiple root elements (found <{}>)",
                element.name
            )))
        }
    }
    Ok(())
}
