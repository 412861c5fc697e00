//! Reader for compiler-emitted XML documentation files.
//!
//! The C# and F# compilers emit one XML file per assembly:
//!
//! ```xml
//! <doc>
//!   <assembly><name>Acme.Widgets</name></assembly>
//!   <members>
//!     <member name="T:Acme.Widget">
//!       <summary>A widget.</summary>
//!     </member>
//!   </members>
//! </doc>
//! ```
//!
//! The reader pulls that shape into `(id, content)` entries. Member content is
//! captured verbatim into the generic [`DocContent`] tree - elements, attributes
//! and text are preserved exactly as written, with no interpretation of
//! `summary`, `param`, `see` or any other tag.

use std::path::Path;

use quick_xml::events::Event;

use crate::{
    model::{
        content::{ContentNode, DocContent},
        resolver::DocRef,
    },
    xmldoc::ids,
    Result,
};

/// The parsed form of one XML documentation file.
#[derive(Debug, Default)]
pub struct XmlDocFile {
    /// The assembly name declared in the file header, when present.
    pub assembly_name: Option<String>,
    /// `(id string, content)` pairs, in document order.
    pub entries: Vec<(String, DocContent)>,
}

impl XmlDocFile {
    /// Parse every entry's ID string into a [`DocRef`].
    ///
    /// Malformed ID strings do not fail the batch; their raw forms are returned
    /// separately so the caller can report them.
    #[must_use]
    pub fn parse_refs(self) -> (Vec<(DocRef, DocContent)>, Vec<String>) {
        let mut parsed = Vec::with_capacity(self.entries.len());
        let mut malformed = Vec::new();

        for (id, content) in self.entries {
            match ids::parse(&id) {
                Ok(reference) => parsed.push((reference, content)),
                Err(_) => malformed.push(id),
            }
        }

        (parsed, malformed)
    }
}

/// Read an XML documentation file from disk.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the file cannot be read and
/// [`crate::Error::XmlError`] if it is not well-formed XML.
pub fn read_file(path: &Path) -> Result<XmlDocFile> {
    let xml = std::fs::read_to_string(path)?;
    read_str(&xml)
}

/// Read an XML documentation file from a string.
///
/// # Errors
///
/// Returns [`crate::Error::Empty`] for empty input, [`crate::Error::XmlError`]
/// if the input is not well-formed XML, and [`crate::Error::Malformed`] if a
/// `<member>` element has no `name` attribute.
pub fn read_str(xml: &str) -> Result<XmlDocFile> {
    if xml.trim().is_empty() {
        return Err(crate::Error::Empty);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    let mut file = XmlDocFile::default();

    // Element stack while capturing one member's content tree.
    let mut member_id: Option<String> = None;
    let mut roots: Vec<ContentNode> = Vec::new();
    let mut stack: Vec<(String, Vec<(String, String)>, Vec<ContentNode>)> = Vec::new();
    let mut in_assembly_name = false;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                depth += 1;
                let name = element_name(start.name().as_ref())?;
                if member_id.is_some() {
                    stack.push((name, read_attributes(&start)?, Vec::new()));
                } else if name == "member" {
                    member_id = Some(member_name_attribute(&start)?);
                    roots.clear();
                } else if name == "name" {
                    in_assembly_name = true;
                }
            }
            Event::Empty(start) => {
                let name = element_name(start.name().as_ref())?;
                if member_id.is_some() {
                    let node = ContentNode::Element {
                        name,
                        attributes: read_attributes(&start)?,
                        children: Vec::new(),
                    };
                    append(&mut stack, &mut roots, node);
                } else if name == "member" {
                    let id = member_name_attribute(&start)?;
                    file.entries.push((id, DocContent::new(Vec::new())));
                }
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                let name = element_name(end.name().as_ref())?;
                if member_id.is_some() {
                    if let Some((element, attributes, children)) = stack.pop() {
                        let node = ContentNode::Element {
                            name: element,
                            attributes,
                            children,
                        };
                        append(&mut stack, &mut roots, node);
                    } else if name == "member" {
                        let id = member_id.take().unwrap_or_default();
                        file.entries
                            .push((id, DocContent::new(std::mem::take(&mut roots))));
                    }
                } else if name == "name" {
                    in_assembly_name = false;
                }
            }
            Event::Text(text) => {
                let value = text.unescape()?.into_owned();
                if member_id.is_some() {
                    if !value.is_empty() {
                        append(&mut stack, &mut roots, ContentNode::Text(value));
                    }
                } else if in_assembly_name && !value.trim().is_empty() {
                    file.assembly_name = Some(value.trim().to_string());
                }
            }
            Event::CData(data) => {
                if member_id.is_some() {
                    let value = String::from_utf8_lossy(&data).into_owned();
                    append(&mut stack, &mut roots, ContentNode::Text(value));
                }
            }
            Event::Eof => {
                if depth != 0 || member_id.is_some() {
                    return Err(crate::Error::XmlError(
                        "Unexpected end of file in XML documentation".to_string(),
                    ));
                }
                break;
            }
            _ => {}
        }
    }

    Ok(file)
}

fn element_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| malformed_error!("Element name is not valid UTF-8"))
}

fn read_attributes(start: &quick_xml::events::BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = element_name(attribute.key.as_ref())?;
        let value = attribute
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn member_name_attribute(start: &quick_xml::events::BytesStart<'_>) -> Result<String> {
    for (key, value) in read_attributes(start)? {
        if key == "name" {
            return Ok(value);
        }
    }
    Err(malformed_error!("<member> element has no name attribute"))
}

fn append(
    stack: &mut [(String, Vec<(String, String)>, Vec<ContentNode>)],
    roots: &mut Vec<ContentNode>,
    node: ContentNode,
) {
    match stack.last_mut() {
        Some((_, _, children)) => children.push(node),
        None => roots.push(node),
    }
}
