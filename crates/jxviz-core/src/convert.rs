//! JSON ↔ XML conversion service used by the editor's mode switch.
//!
//! The naming conventions follow the common JSON.NET mapping: `@name` members become attributes,
//! `#text` becomes element text, arrays become repeated sibling elements. JSON → XML output drops
//! the synthetic `<root>` wrapper and separates top-level elements with a blank line; XML → JSON
//! wraps the fragment in `<root>` and omits it from the output object.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::{DocumentMode, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConversionDirection {
    JsonToXml,
    XmlToJson,
}

impl ConversionDirection {
    /// Direction for switching the editor from `from` to `to`; `None` when nothing changes.
    pub fn between(from: DocumentMode, to: DocumentMode) -> Option<Self> {
        match (from, to) {
            (DocumentMode::Json, DocumentMode::Xml) => Some(Self::JsonToXml),
            (DocumentMode::Xml, DocumentMode::Json) => Some(Self::XmlToJson),
            _ => None,
        }
    }

    pub fn target_mode(self) -> DocumentMode {
        match self {
            Self::JsonToXml => DocumentMode::Xml,
            Self::XmlToJson => DocumentMode::Json,
        }
    }
}

/// Wire shape of a conversion reply: `{ success, content?, message? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConversionResult {
    pub fn ok(content: String) -> Self {
        Self {
            success: true,
            content: Some(content),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            message: Some(message.into()),
        }
    }
}

impl From<Result<String>> for ConversionResult {
    fn from(value: Result<String>) -> Self {
        match value {
            Ok(content) => Self::ok(content),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

pub trait ConversionService {
    fn convert(&self, content: &str, direction: ConversionDirection) -> ConversionResult;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl DefaultConverter {
    pub fn new() -> Self {
        Self
    }

    /// Async variant of [`ConversionService::convert`]; the work is CPU-bound and completes
    /// without suspending, so any executor can drive it.
    pub async fn convert_async(
        &self,
        content: &str,
        direction: ConversionDirection,
    ) -> ConversionResult {
        self.convert(content, direction)
    }
}

impl ConversionService for DefaultConverter {
    fn convert(&self, content: &str, direction: ConversionDirection) -> ConversionResult {
        if content.trim().is_empty() {
            return ConversionResult::failed(Error::EmptyContent.to_string());
        }
        let converted = match direction {
            ConversionDirection::JsonToXml => json_to_xml(content),
            ConversionDirection::XmlToJson => xml_to_json(content),
        };
        if let Err(err) = &converted {
            tracing::debug!(?direction, %err, "conversion failed");
        }
        converted.into()
    }
}

fn conversion_error(message: impl std::fmt::Display) -> Error {
    Error::Conversion {
        message: message.to_string(),
    }
}

fn xml_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*(:[A-Za-z_][A-Za-z0-9_.\-]*)?$").unwrap()
    })
}

pub fn json_to_xml(content: &str) -> Result<String> {
    if content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    let value: Value = serde_json::from_str(content).map_err(conversion_error)?;
    let Value::Object(members) = value else {
        return Err(conversion_error(
            "JSON root must be an object to convert to XML",
        ));
    };

    let mut elements = Vec::new();
    for (name, member) in &members {
        if name.starts_with('@') || name == "#text" {
            return Err(conversion_error(format!(
                "JSON root object cannot carry attributes or text (found '{name}')"
            )));
        }
        write_elements(name, member, 0, &mut elements)?;
    }
    Ok(elements.join("\n\n"))
}

fn write_elements(name: &str, value: &Value, depth: usize, out: &mut Vec<String>) -> Result<()> {
    if let Value::Array(items) = value {
        for item in items {
            write_elements(name, item, depth, out)?;
        }
        return Ok(());
    }
    if !xml_name_re().is_match(name) {
        return Err(conversion_error(format!(
            "The name '{name}' is not a valid XML element name"
        )));
    }

    let indent = "  ".repeat(depth);
    let element = match value {
        Value::Null => format!("{indent}<{name} />"),
        Value::Object(members) => write_object_element(name, members, depth)?,
        scalar => format!(
            "{indent}<{name}>{}</{name}>",
            escape_xml_text(&scalar_text(scalar))
        ),
    };
    out.push(element);
    Ok(())
}

fn write_object_element(name: &str, members: &Map<String, Value>, depth: usize) -> Result<String> {
    let indent = "  ".repeat(depth);
    let mut attrs = String::new();
    let mut text = None;
    let mut children = Vec::new();

    for (key, member) in members {
        if let Some(attr) = key.strip_prefix('@') {
            if !xml_name_re().is_match(attr) {
                return Err(conversion_error(format!(
                    "The name '{attr}' is not a valid XML attribute name"
                )));
            }
            attrs.push_str(&format!(
                " {attr}=\"{}\"",
                escape_xml_attr(&scalar_text(member))
            ));
        } else if key == "#text" {
            text = Some(scalar_text(member));
        } else {
            write_elements(key, member, depth + 1, &mut children)?;
        }
    }

    let out = match (text, children.is_empty()) {
        (None, true) => format!("{indent}<{name}{attrs} />"),
        (Some(text), true) => format!("{indent}<{name}{attrs}>{}</{name}>", escape_xml_text(&text)),
        (text, false) => {
            let mut lines = vec![format!("{indent}<{name}{attrs}>")];
            if let Some(text) = text {
                lines.push(format!("{indent}  {}", escape_xml_text(&text)));
            }
            lines.extend(children);
            lines.push(format!("{indent}</{name}>"));
            lines.join("\n")
        }
    };
    Ok(out)
}

/// Display text of a JSON scalar; `null` reads as an empty string.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn escape_xml_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_xml_attr(s: &str) -> String {
    escape_xml_text(s).replace('"', "&quot;")
}

/// Strips a leading `<?xml …?>` declaration so the fragment can be wrapped in `<root>`.
fn strip_xml_declaration(content: &str) -> &str {
    let trimmed = content.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    content
}

pub fn xml_to_json(content: &str) -> Result<String> {
    if content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    let wrapped = format!("<root>{}</root>", strip_xml_declaration(content));
    let doc = roxmltree::Document::parse(&wrapped).map_err(conversion_error)?;
    let value = element_to_value(doc.root_element());
    let value = match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::to_string_pretty(&value).map_err(conversion_error)
}

fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
    let mut members = Map::new();
    for attr in node.attributes() {
        members.insert(
            format!("@{}", attr.name()),
            Value::String(attr.value().to_string()),
        );
    }

    let mut text = String::new();
    let mut children: IndexMap<String, Vec<Value>> = IndexMap::new();
    for child in node.children() {
        if child.is_element() {
            children
                .entry(child.tag_name().name().to_string())
                .or_default()
                .push(element_to_value(child));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or(""));
        }
    }
    let text = text.trim();

    if members.is_empty() && children.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        };
    }

    if !text.is_empty() {
        members.insert("#text".to_string(), Value::String(text.to_string()));
    }
    for (name, mut values) in children {
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Array(values)
        };
        members.insert(name, value);
    }
    Value::Object(members)
}
