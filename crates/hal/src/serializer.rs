//! Renderer abstraction and the serializer that drives it.

use crate::error::Result;
use crate::mapping::Mapper;
use crate::node::{Node, to_node};
use crate::transformer::HalTransformer;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub const HAL_JSON_MEDIA_TYPE: &str = "application/hal+json";
pub const HAL_XML_MEDIA_TYPE: &str = "application/hal+xml";

/// Encodes a finalized HAL document.
///
/// Renderers are stateless walkers over the document produced by
/// [`HalTransformer::transform`].
pub trait Renderer {
    /// Adjusts the mapping registry once, before any document is produced.
    fn prepare(&self, _mapper: &mut Mapper) {}

    fn media_type(&self) -> &'static str;

    fn render(&self, document: &Value) -> Result<String>;
}

/// Transforms values and renders them with `R`.
#[derive(Debug, Clone)]
pub struct HalSerializer<R> {
    transformer: HalTransformer,
    renderer: R,
}

impl<R: Renderer> HalSerializer<R> {
    pub fn new(mut transformer: HalTransformer, renderer: R) -> Self {
        renderer.prepare(transformer.mapper_mut());
        Self {
            transformer,
            renderer,
        }
    }

    pub fn transformer(&self) -> &HalTransformer {
        &self.transformer
    }

    /// Access to cursor links and metadata between calls.
    pub fn transformer_mut(&mut self) -> &mut HalTransformer {
        &mut self.transformer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Serializes any value through the object-graph producer.
    pub fn serialize<T>(&self, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        self.serialize_node(to_node(value)?)
    }

    /// Serializes an already built tree.
    pub fn serialize_node(&self, node: Node) -> Result<String> {
        let document = self.transformer.transform(node)?;
        let output = self.renderer.render(&document)?;
        debug!(media_type = self.renderer.media_type(), bytes = output.len(), "rendered document");
        Ok(output)
    }
}

/// Media type of a rendered document, judged from its first bytes.
pub fn media_type(output: &str) -> &'static str {
    if output.trim_start().starts_with("<?xml") {
        HAL_XML_MEDIA_TYPE
    } else {
        HAL_JSON_MEDIA_TYPE
    }
}
