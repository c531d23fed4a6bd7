//! XML model loader.
//!
//! The IDL front end hands over its type graph as an XML document:
//!
//! ```xml
//! <unit file="app.idl">
//!   <type name="Mode" storage="enum" namespace="App">
//!     <option name="Fast" label="Fast" blurb="" value="0"/>
//!   </type>
//!   <type name="Widget" storage="interface" namespace="App">
//!     <prerequisite ref="App::Object"/>
//!     <field name="title" type="String"/>
//!     <method name="show" returns="void">
//!       <param name="delay" type="int"/>
//!     </method>
//!   </type>
//! </unit>
//! ```
//!
//! Prerequisite references are resolved once the whole document is read, so
//! types may refer to types declared later.

use crate::error::ParseError;
use crate::ident::{namespace_names, qualified_name};
use crate::types::{
    EnumOption, Field, Method, NodeId, Param, Storage, TypeGraph, TypeHash, TypeNode,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A type whose prerequisite references are still unresolved.
struct PendingType {
    node: TypeNode,
    prerequisites: Vec<String>,
}

/// Parses a type graph from an XML string.
///
/// # Arguments
/// * `xml` - XML model content
///
/// # Returns
/// Parsed type graph or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, an attribute is invalid, a
/// type is declared twice or a prerequisite names an unknown type.
pub fn parse_unit(xml: &str) -> Result<TypeGraph, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut graph: Option<TypeGraph> = None;
    let mut pending: Vec<PendingType> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "unit" => graph = Some(parse_unit_element(e)?),
                    "type" if graph.is_some() => {
                        let mut ty = parse_type_attributes(e)?;
                        parse_type_body(&mut reader, &mut ty)?;
                        pending.push(ty);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "unit" => graph = Some(parse_unit_element(e)?),
                    "type" if graph.is_some() => pending.push(parse_type_attributes(e)?),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut graph = graph.ok_or_else(|| ParseError::InvalidStructure {
        message: "No unit element found".to_string(),
    })?;
    link_prerequisites(&mut graph, pending)?;
    Ok(graph)
}

/// Parses the unit element attributes.
fn parse_unit_element(e: &BytesStart<'_>) -> Result<TypeGraph, ParseError> {
    let mut graph = TypeGraph::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        if key == "file" {
            graph.file = Some(value.to_string());
        }
    }
    Ok(graph)
}

/// Parses the attributes of a type element.
fn parse_type_attributes(e: &BytesStart<'_>) -> Result<PendingType, ParseError> {
    let mut name = None;
    let mut storage = None;
    let mut namespaces = Vec::new();
    let mut is_impl = true;
    let mut is_forward = false;
    let mut type_hash = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "storage" => storage = Some(Storage::parse(value)),
            "namespace" => {
                namespaces = if value.is_empty() {
                    Vec::new()
                } else {
                    value.split("::").map(str::to_string).collect()
                }
            }
            "impl" => is_impl = parse_flag("type", "impl", value)?,
            "forward" => is_forward = parse_flag("type", "forward", value)?,
            "hash" => {
                type_hash = Some(
                    TypeHash::parse(value)
                        .ok_or_else(|| ParseError::invalid_attr("type", "hash", value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("type", "name"))?;
    let storage = storage.ok_or_else(|| ParseError::missing_attr("type", "storage"))?;

    let mut node = TypeNode::new(name, storage).with_impl(is_impl);
    node.namespaces = namespaces;
    node.is_forward = is_forward;
    node.type_hash = type_hash;

    Ok(PendingType {
        node,
        prerequisites: Vec::new(),
    })
}

/// Parses the children of a type element up to its end tag.
fn parse_type_body(reader: &mut Reader<&[u8]>, ty: &mut PendingType) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (element, has_body) = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => (e.into_owned(), true),
            Event::Empty(e) => (e.into_owned(), false),
            Event::End(_) | Event::Eof => break,
            _ => continue,
        };

        let name_bytes = element.name().as_ref().to_vec();
        let tag_name = std::str::from_utf8(&name_bytes)?;
        match tag_name {
            "prerequisite" => {
                let target = required_attr(&element, "prerequisite", "ref")?;
                ty.prerequisites.push(target);
            }
            "field" => {
                let name = required_attr(&element, "field", "name")?;
                let type_name = required_attr(&element, "field", "type")?;
                if ty.node.fields.iter().any(|f| f.name == name) {
                    return Err(ParseError::duplicate("field", name));
                }
                ty.node.fields.push(Field::new(name, type_name));
            }
            "option" => {
                let option = parse_option(&element)?;
                ty.node.options.push(option);
            }
            "method" => {
                let mut method = Method::new(
                    required_attr(&element, "method", "name")?,
                    optional_attr(&element, "returns")?.unwrap_or_else(|| "void".to_string()),
                );
                if has_body {
                    // consumes </method>
                    method.params = parse_params(reader)?;
                }
                ty.node.methods.push(method);
                continue;
            }
            _ => {}
        }

        if has_body {
            skip_to_end(reader)?;
        }
    }

    Ok(())
}

/// Parses an enum option element.
fn parse_option(e: &BytesStart<'_>) -> Result<EnumOption, ParseError> {
    let ident = required_attr(e, "option", "name")?;
    let label = optional_attr(e, "label")?.unwrap_or_else(|| ident.clone());
    let blurb = optional_attr(e, "blurb")?.unwrap_or_default();
    let raw = required_attr(e, "option", "value")?;
    let value = raw
        .parse()
        .map_err(|_| ParseError::invalid_attr("option", "value", raw.as_str()))?;
    Ok(EnumOption::new(ident, label, blurb, value))
}

/// Parses the parameters of a method element up to its end tag.
fn parse_params(reader: &mut Reader<&[u8]>) -> Result<Vec<Param>, ParseError> {
    let mut params = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (element, has_body) = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => (e.into_owned(), true),
            Event::Empty(e) => (e.into_owned(), false),
            Event::End(_) | Event::Eof => break,
            _ => continue,
        };

        if element.name().as_ref() == b"param" {
            params.push(Param {
                name: required_attr(&element, "param", "name")?,
                type_name: required_attr(&element, "param", "type")?,
            });
        }
        if has_body {
            skip_to_end(reader)?;
        }
    }

    Ok(params)
}

/// Resolves prerequisite references and adds every type to the graph.
fn link_prerequisites(graph: &mut TypeGraph, pending: Vec<PendingType>) -> Result<(), ParseError> {
    let mut links = Vec::with_capacity(pending.len());
    for ty in pending {
        let qualified = qualified_name("::", &ty.node, None);
        let defined = graph
            .lookup(&qualified)
            .is_some_and(|existing| !graph.node(existing).is_forward);
        if defined && !ty.node.is_forward {
            return Err(ParseError::duplicate("type", qualified));
        }
        let id = graph.add(ty.node);
        links.push((id, ty.prerequisites));
    }

    for (id, targets) in links {
        for target in targets {
            let base = resolve_reference(graph, id, &target).ok_or_else(|| {
                ParseError::UnknownType {
                    type_name: target.clone(),
                    referrer: qualified_name("::", graph.node(id), None),
                }
            })?;
            graph.node_mut(id).prerequisites.push(base);
        }
    }

    Ok(())
}

/// Looks a reference up relative to the referrer's namespace, then as written.
///
/// A leading `::` makes the reference absolute.
fn resolve_reference(graph: &TypeGraph, referrer: NodeId, target: &str) -> Option<NodeId> {
    if let Some(absolute) = target.strip_prefix("::") {
        return graph.lookup(absolute);
    }
    let scoped = namespace_names(graph.node(referrer))
        .into_iter()
        .chain(std::iter::once(target))
        .collect::<Vec<_>>()
        .join("::");
    graph.lookup(&scoped).or_else(|| graph.lookup(target))
}

fn parse_flag(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

fn optional_attr(e: &BytesStart<'_>, attribute: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == attribute.as_bytes() {
            return Ok(Some(std::str::from_utf8(&attr.value)?.to_string()));
        }
    }
    Ok(None)
}

fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    optional_attr(e, attribute)?.ok_or_else(|| ParseError::missing_attr(element, attribute))
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
