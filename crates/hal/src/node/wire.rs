//! Decoder for the tagged JSON wire format.
//!
//! Producers outside Rust hand the engine plain JSON where objects carry
//! `@`-prefixed annotation keys:
//!
//! ```json
//! {
//!   "@type": "Post",
//!   "title": "Hello",
//!   "tags": {"@map": "array", "@value": ["a", "b"]},
//!   "score": {"@scalar": "float", "@value": 1.5}
//! }
//! ```
//!
//! Annotations never survive decoding; the information moves into the
//! [`Node`] variant instead.

use super::{Fields, Node, Resource};
use serde_json::{Map, Value};
use tracing::debug;

/// Marks an object as originating from a typed value.
pub const TYPE_KEY: &str = "@type";
/// Marks an object as a list wrapper around `@value`.
pub const MAP_TYPE_KEY: &str = "@map";
/// Marks an object as a scalar wrapper around `@value`.
pub const SCALAR_TYPE_KEY: &str = "@scalar";
/// Payload key of list and scalar wrappers.
pub const VALUE_KEY: &str = "@value";

const ANNOTATION_PREFIX: char = '@';

impl Node {
    /// Decodes a tree in the tagged wire format.
    ///
    /// Decoding never fails. Annotations that do not fit their expected shape
    /// are dropped and the value underneath is kept as structural data: a
    /// non-string `@type` yields a plain map, a wrapper without `@value`
    /// yields its remaining keys, and a wrapper whose payload has the wrong
    /// shape yields the payload itself.
    pub fn from_tagged_json(value: Value) -> Node {
        match value {
            Value::Array(items) => decode_list(items),
            Value::Object(map) => decode_object(map),
            scalar => Node::from_value(scalar),
        }
    }
}

fn decode_list(items: Vec<Value>) -> Node {
    Node::List(items.into_iter().map(Node::from_tagged_json).collect())
}

fn decode_object(mut map: Map<String, Value>) -> Node {
    if map.contains_key(SCALAR_TYPE_KEY) {
        return match map.shift_remove(VALUE_KEY) {
            Some(value) => {
                if value.is_array() || value.is_object() {
                    debug!("scalar wrapper holds a container, keeping it as is");
                }
                Node::from_tagged_json(value)
            }
            None => unwrapped_fields(map, SCALAR_TYPE_KEY),
        };
    }

    if map.contains_key(MAP_TYPE_KEY) {
        return match map.shift_remove(VALUE_KEY) {
            Some(Value::Array(items)) => decode_list(items),
            // keyed collections arrive as objects
            Some(Value::Object(entries)) => Node::Map(decode_fields(entries)),
            Some(scalar) => {
                debug!(payload = %scalar, "list wrapper holds a scalar, keeping it as is");
                Node::from_value(scalar)
            }
            None => unwrapped_fields(map, MAP_TYPE_KEY),
        };
    }

    match map.shift_remove(TYPE_KEY) {
        Some(Value::String(type_name)) if !type_name.is_empty() => Node::Resource(Resource {
            type_name,
            fields: decode_fields(map),
        }),
        Some(Value::String(_)) | Some(Value::Null) | None => Node::Map(decode_fields(map)),
        Some(other) => {
            debug!(tag = %other, "type tag is not a string, rendering as structural data");
            Node::Map(decode_fields(map))
        }
    }
}

fn unwrapped_fields(map: Map<String, Value>, marker: &str) -> Node {
    debug!(marker, "wrapper without `{}`, keeping its other keys", VALUE_KEY);
    Node::Map(decode_fields(map))
}

fn decode_fields(map: Map<String, Value>) -> Fields {
    map.into_iter()
        .filter(|(key, _)| !key.starts_with(ANNOTATION_PREFIX))
        .map(|(key, value)| (key, Node::from_tagged_json(value)))
        .collect()
}
