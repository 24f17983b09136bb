//! The type-tagged object tree consumed by the transformation engine.
//!
//! Every value handed to the engine is first turned into a [`Node`]. The
//! variant says what the value is, so consumers match on it instead of probing
//! for magic keys:
//!
//! | Variant | Origin |
//! |---------|--------|
//! | [`Node::Scalar`] | numbers, strings, booleans, null |
//! | [`Node::Map`] | plain structural maps (`HashMap`, a `dates` object, ...) |
//! | [`Node::Resource`] | a map produced from a typed object, tagged with its type |
//! | [`Node::List`] | sequences |
//!
//! Trees are built per serialize call, rewritten in place during embedding and
//! link assembly, and finally lowered to a `serde_json::Value` with
//! [`Node::into_value`], which drops every type tag.

mod ser;
mod wire;

pub use ser::{NodeSerializer, to_node};
pub use wire::{MAP_TYPE_KEY, SCALAR_TYPE_KEY, TYPE_KEY, VALUE_KEY};

use crate::links::Link;
use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Ordered fields of a map or resource node.
pub type Fields = IndexMap<String, Node>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Text used when the scalar is substituted into a URL template.
    ///
    /// Returns `None` for null, which never counts as an identifier value.
    pub fn to_template_value(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::String(s) => Some(s.clone()),
        }
    }

    /// Converts a JSON scalar. Containers are not scalars and yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(b)),
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::String(s) => Some(Scalar::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::String(s) => Value::String(s),
        }
    }
}

/// A map that originated from a typed object.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Type identifier as reported by the producer (`Post`, `app::model::Post`).
    pub type_name: String,
    pub fields: Fields,
}

impl Resource {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Fields::new(),
        }
    }

    /// Adds a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// A node of the type-tagged tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Map(Fields),
    Resource(Resource),
    List(Vec<Node>),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// Builds a bare `{"href": ...}` link object.
    pub fn href(href: impl Into<String>) -> Self {
        Link::new(href).to_node()
    }

    /// The type tag, if this node is a resource.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Node::Resource(resource) => Some(&resource.type_name),
            _ => None,
        }
    }

    /// Fields of a map or resource node.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Node::Map(fields) => Some(fields),
            Node::Resource(resource) => Some(&resource.fields),
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Node::Map(fields) => Some(fields),
            Node::Resource(resource) => Some(&mut resource.fields),
            _ => None,
        }
    }

    /// First scalar found depth-first, used to read identifier values that are
    /// wrapped in value objects (`{"postId": {"postId": 9}}` yields `9`).
    pub fn first_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            Node::Map(fields) => fields.values().find_map(Node::first_scalar),
            Node::Resource(resource) => resource.fields.values().find_map(Node::first_scalar),
            Node::List(_) => None,
        }
    }

    /// Lowers the tree to plain JSON, stripping type tags and list markers.
    pub fn into_value(self) -> Value {
        match self {
            Node::Scalar(scalar) => scalar.into_value(),
            Node::Map(fields) => fields_to_value(fields),
            Node::Resource(resource) => fields_to_value(resource.fields),
            Node::List(items) => Value::Array(items.into_iter().map(Node::into_value).collect()),
        }
    }

    /// Builds an untagged tree from plain JSON. Objects become structural maps.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Node::List(items.into_iter().map(Node::from_value).collect()),
            Value::Object(map) => Node::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from_value(value)))
                    .collect(),
            ),
            scalar => Scalar::from_value(scalar)
                .map(Node::Scalar)
                .unwrap_or_else(Node::null),
        }
    }
}

fn fields_to_value(fields: Fields) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, node)| (key, node.into_value()))
            .collect(),
    )
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Resource> for Node {
    fn from(resource: Resource) -> Self {
        Node::Resource(resource)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(Scalar::Number(n.into()))
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        Node::Scalar(Scalar::Number(n.into()))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}
