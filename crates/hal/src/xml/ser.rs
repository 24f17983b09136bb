//! HAL+XML rendering by walking a finalized document.
//!
//! The walk mirrors the JSON shape: objects with an `href` become `<link>`
//! elements, objects with a self link become `<resource>` elements and every
//! other member becomes an element named after its key. Scalar text is
//! written as CDATA.

use crate::error::{HalError, Result};
use crate::keys;
use crate::mapping::Mapper;
use crate::serializer::{HAL_XML_MEDIA_TYPE, HalSerializer, Renderer};
use crate::transformer::HalTransformer;
use crate::xml::utils::{
    LINK_ATTRIBUTES, LINK_ELEMENT, REL_ATTRIBUTE, RESOURCE_ELEMENT, attribute_text, cdata_sections,
    display_key, element_name, link_href, scalar_text, self_href,
};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

/// Renders documents as indented HAL+XML.
///
/// Pagination containers are recognized without an explicit mapping, so
/// [`prepare`](Renderer::prepare) registers the built-in pagination mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl XmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for XmlRenderer {
    fn prepare(&self, mapper: &mut Mapper) {
        mapper.register_pagination();
    }

    fn media_type(&self) -> &'static str {
        HAL_XML_MEDIA_TYPE
    }

    fn render(&self, document: &Value) -> Result<String> {
        to_xml_string(document)
    }
}

/// Serializer producing HAL+XML.
pub type HalXmlSerializer = HalSerializer<XmlRenderer>;

/// Serialize a value to a HAL+XML string.
pub fn to_hal_xml_string<T>(value: &T, transformer: &HalTransformer) -> Result<String>
where
    T: Serialize + ?Sized,
{
    HalSerializer::new(transformer.clone(), XmlRenderer).serialize(value)
}

/// Render a finalized HAL document as an XML string.
pub fn to_xml_string(document: &Value) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer(document, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| HalError::Custom(e.to_string()))
}

/// Render a finalized HAL document to an XML writer.
pub fn to_xml_writer<W: Write>(document: &Value, writer: W) -> Result<()> {
    let mut walker = XmlWalker::new(writer);
    walker.write_document(document)
}

/// Members written as child elements, in document order.
type Children<'v> = Vec<(&'v str, &'v Value)>;

/// Entries of `map` that become child elements. Scalar `href` members are
/// carried by attributes and never repeated as elements.
fn children<'v>(map: &'v Map<String, Value>, skip: &[&str]) -> Children<'v> {
    map.iter()
        .filter(|(key, value)| {
            let name = display_key(key);
            let attribute = name == keys::HREF && !value.is_object() && !value.is_array();
            !attribute && !skip.contains(&name)
        })
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

fn items(values: &[Value]) -> Children<'_> {
    values.iter().map(|value| (RESOURCE_ELEMENT, value)).collect()
}

struct XmlWalker<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWalker<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: Writer::new_with_indent(writer, b' ', 2),
        }
    }

    fn write_document(&mut self, document: &Value) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        match document {
            Value::Object(map) => {
                let mut root = BytesStart::new(RESOURCE_ELEMENT);
                if let Some(href) = self_href(map) {
                    root.push_attribute((keys::HREF, href));
                }
                self.write_element(root, children(map, &[]))
            }
            Value::Array(values) => {
                self.write_element(BytesStart::new(RESOURCE_ELEMENT), items(values))
            }
            scalar => self.write_scalar(RESOURCE_ELEMENT, scalar),
        }
    }

    fn write_member(&mut self, key: &str, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => self.write_object(key, map),
            Value::Array(values) => {
                let name = element_name(key);
                self.write_element(BytesStart::new(name.as_ref()), items(values))
            }
            scalar => self.write_scalar(&element_name(key), scalar),
        }
    }

    fn write_object(&mut self, key: &str, map: &Map<String, Value>) -> Result<()> {
        let rel = display_key(key);

        if let Some(href) = link_href(map) {
            let mut link = BytesStart::new(LINK_ELEMENT);
            link.push_attribute((REL_ATTRIBUTE, rel));
            link.push_attribute((keys::HREF, href));
            for attribute in &LINK_ATTRIBUTES[1..] {
                if let Some(text) = attribute_text(map.get(*attribute)) {
                    link.push_attribute((*attribute, text.as_ref()));
                }
            }
            return self.write_element(link, children(map, &LINK_ATTRIBUTES));
        }

        if let Some(href) = self_href(map) {
            let mut resource = BytesStart::new(RESOURCE_ELEMENT);
            resource.push_attribute((keys::HREF, href));
            if rel != RESOURCE_ELEMENT {
                resource.push_attribute((REL_ATTRIBUTE, rel));
            }
            return self.write_element(resource, children(map, &[]));
        }

        let name = element_name(key);
        self.write_element(BytesStart::new(name.as_ref()), children(map, &[]))
    }

    fn write_element(&mut self, start: BytesStart<'_>, children: Children<'_>) -> Result<()> {
        if children.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        let end = start.to_end().into_owned();
        self.writer.write_event(Event::Start(start))?;
        for (key, value) in children {
            self.write_member(key, value)?;
        }
        self.writer.write_event(Event::End(end))?;
        Ok(())
    }

    fn write_scalar(&mut self, name: &str, value: &Value) -> Result<()> {
        let text = scalar_text(value);
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))?;
        for section in cdata_sections(&text) {
            self.writer
                .write_event(Event::CData(BytesCData::new(section)))?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}
