//! Helpers for mapping HAL document members onto XML.

use crate::keys;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Element used for the document root, list items and embedded resources.
pub const RESOURCE_ELEMENT: &str = "resource";

/// Element used for link objects.
pub const LINK_ELEMENT: &str = "link";

/// Attribute carrying a link relation.
pub const REL_ATTRIBUTE: &str = "rel";

/// Link members written as attributes of `<link>`, in output order.
pub const LINK_ATTRIBUTES: [&str; 4] = [keys::HREF, keys::HREF_LANG, keys::TITLE, keys::TYPE];

/// The key as it appears in XML: leading underscores are dropped and
/// numeric keys become `resource`.
pub fn display_key(key: &str) -> &str {
    let trimmed = key.trim_start_matches('_');
    if trimmed.is_empty() || trimmed.bytes().all(|b| b.is_ascii_digit()) {
        RESOURCE_ELEMENT
    } else {
        trimmed
    }
}

/// A valid element name for `key`.
pub fn element_name(key: &str) -> Cow<'_, str> {
    let name = display_key(key);
    let valid = |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':');
    let starts_ok = name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_');
    if starts_ok && name.chars().all(valid) {
        return Cow::Borrowed(name);
    }
    let mut sanitized: String = name.chars().map(|c| if valid(c) { c } else { '_' }).collect();
    if !starts_ok {
        sanitized.insert(0, '_');
    }
    Cow::Owned(sanitized)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// `href` of a link object.
pub fn link_href(map: &Map<String, Value>) -> Option<&str> {
    non_empty_str(map.get(keys::HREF))
}

/// `_links.self.href` of a resource.
pub fn self_href(map: &Map<String, Value>) -> Option<&str> {
    let link = map.get(keys::LINKS)?.get(keys::SELF)?;
    non_empty_str(link.get(keys::HREF))
}

/// Text of a link attribute. Missing, null, false and empty values yield `None`.
pub fn attribute_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// Text content of a scalar leaf. Character references and HTML5 named
/// entities in strings are decoded; text with an unknown or unterminated
/// reference is kept as is.
pub fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::String(s) => unescape_with(s, resolve_html5_entity).unwrap_or(Cow::Borrowed(s.as_str())),
        Value::Array(_) | Value::Object(_) => Cow::Borrowed(""),
    }
}

/// Splits text so that no section contains the `]]>` terminator.
pub fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}
