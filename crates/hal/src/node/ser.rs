//! Object-graph producer implemented as a custom `serde::Serializer`.
//!
//! Named-field structs become [`Node::Resource`] tagged with the serde struct
//! name, so any `#[derive(Serialize)]` type can be fed to the engine. The
//! container name honors `#[serde(rename = "...")]`.

use super::{Fields, Node, Resource, Scalar};
use crate::error::{HalError, Result};
use serde::ser::{self, Serialize};
use serde_json::Number;

/// Builds a type-tagged tree from any serializable value.
///
/// # Examples
///
/// ```
/// use helios_hal::node::{Node, to_node};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Post {
///     id: u32,
///     title: String,
/// }
///
/// let node = to_node(&Post { id: 1, title: "Hello".into() })?;
/// assert_eq!(node.type_name(), Some("Post"));
/// # Ok::<(), helios_hal::HalError>(())
/// ```
pub fn to_node<T>(value: &T) -> Result<Node>
where
    T: Serialize + ?Sized,
{
    value.serialize(NodeSerializer)
}

/// Serializer producing [`Node`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSerializer;

fn number(n: impl Into<Number>) -> Result<Node> {
    Ok(Node::Scalar(Scalar::Number(n.into())))
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = HalError;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = TupleVariantSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = StructVariantSerializer;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::Scalar(Scalar::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        number(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        number(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        number(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        number(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        number(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        number(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        number(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        number(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        // NaN and infinities have no JSON form
        Ok(Node::Scalar(
            Number::from_f64(v)
                .map(Scalar::Number)
                .unwrap_or(Scalar::Null),
        ))
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::Scalar(Scalar::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::Scalar(Scalar::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(Node::List(
            v.iter()
                .map(|b| Node::Scalar(Scalar::Number((*b).into())))
                .collect(),
        ))
    }

    fn serialize_none(self) -> Result<Node> {
        Ok(Node::null())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::null())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node> {
        Ok(Node::null())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::Scalar(Scalar::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        let mut fields = Fields::new();
        fields.insert(variant.to_string(), to_node(value)?);
        Ok(Node::Map(fields))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(TupleVariantSerializer {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            fields: Fields::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructSerializer {
            resource: Resource {
                type_name: name.to_string(),
                fields: Fields::with_capacity(len),
            },
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(StructVariantSerializer {
            resource: Resource {
                type_name: variant.to_string(),
                fields: Fields::with_capacity(len),
            },
        })
    }
}

pub struct SeqSerializer {
    items: Vec<Node>,
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::List(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node> {
        ser::SerializeSeq::end(self)
    }
}

pub struct TupleVariantSerializer {
    variant: &'static str,
    items: Vec<Node>,
}

impl ser::SerializeTupleVariant for TupleVariantSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        let mut fields = Fields::new();
        fields.insert(self.variant.to_string(), Node::List(self.items));
        Ok(Node::Map(fields))
    }
}

pub struct MapSerializer {
    fields: Fields,
    next_key: Option<String>,
}

/// Map keys must lower to text.
fn key_to_string(key: Node) -> Result<String> {
    match key {
        Node::Scalar(Scalar::String(s)) => Ok(s),
        Node::Scalar(Scalar::Number(n)) => Ok(n.to_string()),
        Node::Scalar(Scalar::Bool(b)) => Ok(b.to_string()),
        other => Err(HalError::Producer(format!(
            "map keys must be strings, numbers or booleans, found {:?}",
            other
        ))),
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key_to_string(to_node(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| HalError::Producer("map value without a key".to_string()))?;
        self.fields.insert(key, to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Map(self.fields))
    }
}

pub struct StructSerializer {
    resource: Resource,
}

impl ser::SerializeStruct for StructSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.resource
            .fields
            .insert(key.to_string(), to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Resource(self.resource))
    }
}

pub struct StructVariantSerializer {
    resource: Resource,
}

impl ser::SerializeStructVariant for StructVariantSerializer {
    type Ok = Node;
    type Error = HalError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.resource
            .fields
            .insert(key.to_string(), to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        let mut fields = Fields::new();
        fields.insert(
            self.resource.type_name.clone(),
            Node::Resource(self.resource),
        );
        Ok(Node::Map(fields))
    }
}
