//! Finalization of a transformed tree into the renderer-agnostic document.

use crate::case::camel_to_snake;
use crate::keys;
use crate::node::Node;
use serde_json::{Map, Value};

/// Lowers the tree to JSON, flattens single-scalar maps and snake-cases keys.
pub fn finalize(node: Node) -> Value {
    let mut value = node.into_value();
    flatten_single_scalars(&mut value);
    snake_case_keys(value)
}

fn is_flattenable(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Replaces every object holding exactly one non-null scalar with that
/// scalar, top-down. Nothing under a `_links` key is touched.
///
/// ```
/// use helios_hal::postprocess::flatten_single_scalars;
/// use serde_json::json;
///
/// let mut value = json!({"postId": {"postId": 9}, "_links": {"self": {"href": "/p/9"}}});
/// flatten_single_scalars(&mut value);
/// assert_eq!(value, json!({"postId": 9, "_links": {"self": {"href": "/p/9"}}}));
/// ```
pub fn flatten_single_scalars(value: &mut Value) {
    if let Value::Object(map) = value
        && map.len() == 1
        && map.values().all(is_flattenable)
    {
        let scalar = map.values_mut().next().map(Value::take);
        if let Some(scalar) = scalar {
            *value = scalar;
        }
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key != keys::LINKS {
                    flatten_single_scalars(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(flatten_single_scalars),
        _ => {}
    }
}

/// Rewrites every object key to snake_case, recursively.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (camel_to_snake(&key), snake_case_keys(child)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

/// Attaches `_meta` to an object document. Empty metadata is not attached.
pub fn attach_meta(document: &mut Value, meta: &Map<String, Value>) {
    if meta.is_empty() {
        return;
    }
    if let Value::Object(map) = document {
        map.insert(keys::META.to_string(), Value::Object(meta.clone()));
    }
}
