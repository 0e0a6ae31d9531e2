//! Box registry XML parser.
//!
//! This module parses the declarative XML description of a box class
//! hierarchy into a [`Registry`]. Class declaration order is preserved.

use crate::error::ParseError;
use crate::types::{
    ClassDef, ClassKind, ConstructorShape, MethodDecl, NamingConfig, Registry, parse_bool,
    split_list,
};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;

/// Parses a box registry from an XML string.
///
/// # Arguments
/// * `xml` - XML registry content
///
/// # Returns
/// Parsed registry or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid registry elements.
pub fn parse_registry(xml: &str) -> Result<Registry, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut registry: Option<Registry> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "boxSchema" {
                    if registry.is_some() {
                        return Err(ParseError::duplicate("boxSchema", "boxSchema"));
                    }
                    registry = Some(parse_box_schema(e)?);
                } else if let Some(registry) = registry.as_mut() {
                    match name {
                        "imports" => parse_imports(&mut reader, registry)?,
                        "naming" => {
                            registry.naming = parse_naming(e)?;
                            skip_element(&mut reader, e)?;
                        }
                        "policy" => parse_policy(&mut reader, registry)?,
                        "classes" => parse_classes(&mut reader, registry)?,
                        other => return Err(ParseError::unknown_element(other, "boxSchema")),
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "boxSchema" {
                    if registry.is_some() {
                        return Err(ParseError::duplicate("boxSchema", "boxSchema"));
                    }
                    registry = Some(parse_box_schema(e)?);
                } else if let Some(registry) = registry.as_mut() {
                    match name {
                        "naming" => registry.naming = parse_naming(e)?,
                        "imports" | "policy" | "classes" => {}
                        other => return Err(ParseError::unknown_element(other, "boxSchema")),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let registry = registry.ok_or_else(|| ParseError::InvalidStructure {
        message: "No boxSchema element found".to_string(),
    })?;

    tracing::debug!(
        "parsed registry '{}' with {} classes",
        registry.package,
        registry.classes().len()
    );

    Ok(registry)
}

/// Parses the boxSchema element attributes.
fn parse_box_schema(e: &BytesStart<'_>) -> Result<Registry, ParseError> {
    let mut package = None;
    let mut root = "Box".to_string();
    let mut generator = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "package" => package = Some(value.to_string()),
            "root" => {
                if value.trim().is_empty() {
                    return Err(ParseError::invalid_attr("boxSchema", "root", value));
                }
                root = value.trim().to_string();
            }
            "generator" => generator = Some(value.to_string()),
            _ => {}
        }
    }

    let package = package.ok_or_else(|| ParseError::missing_attr("boxSchema", "package"))?;
    let mut registry = Registry::new(package, root);
    if let Some(generator) = generator {
        registry.generator = generator;
    }

    Ok(registry)
}

/// Parses the imports section.
fn parse_imports(reader: &mut Reader<&[u8]>, registry: &mut Registry) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                registry.imports.push(parse_import(e)?);
                skip_element(reader, e)?;
            }
            Ok(Event::Empty(ref e)) => {
                registry.imports.push(parse_import(e)?);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses one import element.
fn parse_import(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    if tag_name != "import" {
        return Err(ParseError::unknown_element(tag_name, "imports"));
    }
    required_attr(e, "import", "path")
}

/// Parses the naming element attributes on top of the defaults.
fn parse_naming(e: &BytesStart<'_>) -> Result<NamingConfig, ParseError> {
    let mut naming = NamingConfig::default();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?.to_string();

        match key {
            "interfaceSuffix" => naming.interface_suffix = value,
            "stripSuffix" => naming.strip_suffix = value,
            "tagSuffix" => {
                if value.is_empty() {
                    return Err(ParseError::invalid_attr("naming", "tagSuffix", value));
                }
                naming.tag_suffix = value;
            }
            "typeEnum" => naming.type_enum = value,
            "fieldsStruct" => naming.fields_struct = value,
            "builderMethod" => naming.builder_method = value,
            "builderSuffix" => naming.builder_suffix = value,
            "styleCascade" => naming.style_cascade = value,
            "canonicalConstructor" => {
                naming.canonical_constructor = ConstructorShape::parse(&value);
            }
            _ => {}
        }
    }

    Ok(naming)
}

/// Parses the policy section.
fn parse_policy(reader: &mut Reader<&[u8]>, registry: &mut Registry) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "abstract" => {
                        let name = required_attr(e, tag_name, "name")?;
                        registry.policy.abstract_types.push(name);
                    }
                    "handWritten" => {
                        let name = required_attr(e, tag_name, "name")?;
                        registry.policy.hand_written.push(name);
                    }
                    other => return Err(ParseError::unknown_element(other, "policy")),
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"policy" {
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

/// Parses the classes section.
fn parse_classes(reader: &mut Reader<&[u8]>, registry: &mut Registry) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "class" {
                    return Err(ParseError::unknown_element(tag_name, "classes"));
                }
                let mut class = parse_class_attributes(e)?;
                parse_class_body(reader, &mut class)?;
                registry.add_class(class);
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "class" {
                    return Err(ParseError::unknown_element(tag_name, "classes"));
                }
                registry.add_class(parse_class_attributes(e)?);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses the attributes of a class element.
fn parse_class_attributes(e: &BytesStart<'_>) -> Result<ClassDef, ParseError> {
    let mut name = None;
    let mut class = ClassDef::default();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.trim().to_string()),
            "parents" => class.parents = split_list(value),
            "abstract" => {
                class.kind = ClassKind::from_abstract_flag(value)
                    .ok_or_else(|| ParseError::invalid_attr("class", "abstract", value))?;
            }
            "handWritten" => {
                class.needs_hand_written = parse_bool(value)
                    .ok_or_else(|| ParseError::invalid_attr("class", "handWritten", value))?;
            }
            _ => {}
        }
    }

    class.name = name.ok_or_else(|| ParseError::missing_attr("class", "name"))?;
    Ok(class)
}

/// Parses the children of a class element, up to its end tag.
fn parse_class_body(reader: &mut Reader<&[u8]>, class: &mut ClassDef) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name == "doc" {
                    if class.doc.is_some() {
                        return Err(ParseError::duplicate("doc", class.name.as_str()));
                    }
                    class.doc = Some(read_text(reader)?);
                } else {
                    parse_class_member(class, tag_name, e)?;
                    skip_element(reader, e)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "doc" {
                    parse_class_member(class, tag_name, e)?;
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated class '{}'", class.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a constructor or method element of a class.
fn parse_class_member(
    class: &mut ClassDef,
    tag_name: &str,
    e: &BytesStart<'_>,
) -> Result<(), ParseError> {
    match tag_name {
        "constructor" => {
            if class.constructor.is_some() {
                return Err(ParseError::duplicate("constructor", class.name.as_str()));
            }
            let params = optional_attr(e, "params")?.unwrap_or_default();
            class.constructor = Some(ConstructorShape::parse(&params));
        }
        "method" => {
            let name = required_attr(e, "method", "name")?;
            let method = match optional_attr(e, "inherited")? {
                Some(from) => MethodDecl::inherited(name, from),
                None => MethodDecl::own(name),
            };
            class.methods.push(method);
        }
        other => return Err(ParseError::unknown_element(other, "class")),
    }
    Ok(())
}

/// Reads text content up to the end tag of the current element.
///
/// Character and predefined entity references are resolved. Whitespace
/// inside the element is kept and only the ends are trimmed.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    reader.config_mut().trim_text(false);
    let text = collect_text(reader);
    reader.config_mut().trim_text(true);
    Ok(text?.trim().to_string())
}

fn collect_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                text.push_str(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::CData(ref c)) => {
                text.push_str(std::str::from_utf8(c)?);
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(ch) = r.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(r)?;
                    let value = resolve_predefined_entity(name).ok_or_else(|| {
                        ParseError::InvalidStructure {
                            message: format!("unknown entity '&{name};' in text"),
                        }
                    })?;
                    text.push_str(value);
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Skips everything up to the end tag of `e`.
fn skip_element(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<(), ParseError> {
    let name = e.name().as_ref().to_vec();
    let mut buf = Vec::new();
    reader.read_to_end_into(QName(&name), &mut buf)?;
    Ok(())
}

/// Reads an attribute value, if present.
fn optional_attr(e: &BytesStart<'_>, attribute: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == attribute.as_bytes() {
            return Ok(Some(std::str::from_utf8(&attr.value)?.trim().to_string()));
        }
    }
    Ok(None)
}

/// Reads a required, non-blank attribute value.
fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    match optional_attr(e, attribute)? {
        Some(value) if !value.is_empty() => Ok(value),
        Some(value) => Err(ParseError::invalid_attr(element, attribute, value)),
        None => Err(ParseError::missing_attr(element, attribute)),
    }
}
