//! Order-preserving XML request bodies and response decoding.
//!
//! The provider validates request bodies against a sequence schema, so element
//! order is part of the contract. [`OrderedFields`] is an explicit list of
//! `(element, value)` pairs written back out in exactly the order they were
//! added; nothing here goes through a map.

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::de::DeserializeOwned;

use crate::error::{Result, Route53Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    Text(String),
    Nested(OrderedFields),
}

impl From<&str> for XmlValue {
    fn from(value: &str) -> Self {
        XmlValue::Text(value.to_string())
    }
}

impl From<String> for XmlValue {
    fn from(value: String) -> Self {
        XmlValue::Text(value)
    }
}

impl From<OrderedFields> for XmlValue {
    fn from(value: OrderedFields) -> Self {
        XmlValue::Nested(value)
    }
}

/// Attributes and child elements of one XML element, in emission order.
///
/// Repeated names are allowed and produce repeated sibling elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderedFields {
    attributes: Vec<(String, String)>,
    fields: Vec<(String, XmlValue)>,
}

/// Builds an [`OrderedFields`] from pairs, keeping the caller's order.
pub fn ordered_hash<K, V, I>(fields: I) -> OrderedFields
where
    K: Into<String>,
    V: Into<XmlValue>,
    I: IntoIterator<Item = (K, V)>,
{
    OrderedFields {
        attributes: Vec::new(),
        fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
}

impl OrderedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), XmlValue::Text(value.into())));
        self
    }

    /// Adds a text element only when a value is present.
    pub fn text_opt<S: Into<String>>(self, name: &str, value: Option<S>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn nested(mut self, name: &str, value: OrderedFields) -> Self {
        self.fields.push((name.to_string(), XmlValue::Nested(value)));
        self
    }

    /// Adds a child element only when present.
    pub fn nested_opt(self, name: &str, value: Option<OrderedFields>) -> Self {
        match value {
            Some(v) => self.nested(name, v),
            None => self,
        }
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// First child element with the given name.
    pub fn get(&self, name: &str) -> Option<&XmlValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Renders a full document: UTF-8 declaration, then `root` carrying these fields.
    pub fn to_document(&self, root: &str) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(serialization_error)?;
        write_element(&mut writer, root, self)?;
        String::from_utf8(writer.into_inner()).map_err(serialization_error)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, fields: &OrderedFields) -> Result<()> {
    let mut start = BytesStart::new(name);
    for (k, v) in &fields.attributes {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    writer.write_event(Event::Start(start)).map_err(serialization_error)?;

    for (k, v) in &fields.fields {
        match v {
            XmlValue::Text(text) => {
                writer
                    .write_event(Event::Start(BytesStart::new(k.as_str())))
                    .map_err(serialization_error)?;
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(serialization_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new(k.as_str())))
                    .map_err(serialization_error)?;
            }
            XmlValue::Nested(child) => write_element(writer, k, child)?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(serialization_error)?;
    Ok(())
}

fn serialization_error<E: Display>(e: E) -> Route53Error {
    Route53Error::Serialization(e.to_string())
}

/// Decodes a response body into its wire shape.
pub fn from_xml<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value = quick_xml::de::from_str(body).inspect_err(|e| {
        log::error!("XML decode failed: {}", e);
        log::debug!("raw response: {}", body);
    })?;
    Ok(value)
}
