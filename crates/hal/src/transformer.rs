//! The transformation pipeline shared by every renderer.
//!
//! ```text
//! Node ─► rewrite properties ─► embed + link ─► finalize ─► _meta ─► serde_json::Value
//! ```
//!
//! A bare list at the root is a collection: it becomes
//! `{"total": n, "_embedded": [...]}` with each element run through the
//! per-object pipeline, and the document-level links and metadata go on the
//! wrapper.

use crate::embed::{Embedder, SelfPlacement};
use crate::error::{HalError, Result};
use crate::keys;
use crate::links::{CursorLinks, existing_links, merge_links, prune_links, set_links};
use crate::mapping::Mapper;
use crate::node::Node;
use crate::postprocess::{attach_meta, finalize};
use crate::rewrite::rewrite_properties;
use serde_json::{Map, Value};
use tracing::debug;

/// Turns type-tagged trees into finalized HAL documents.
///
/// Cursor links and metadata are set on the transformer and apply to every
/// subsequent call. Curies are collected per call.
#[derive(Debug, Clone, Default)]
pub struct HalTransformer {
    mapper: Mapper,
    cursor: CursorLinks,
    meta: Map<String, Value>,
}

impl HalTransformer {
    pub fn new(mapper: Mapper) -> Self {
        Self {
            mapper,
            ..Default::default()
        }
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut Mapper {
        &mut self.mapper
    }

    pub fn cursor_links(&self) -> &CursorLinks {
        &self.cursor
    }

    pub fn set_self_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.cursor.self_url = Some(url.into());
        self
    }

    pub fn set_first_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.cursor.first = Some(url.into());
        self
    }

    pub fn set_prev_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.cursor.prev = Some(url.into());
        self
    }

    pub fn set_next_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.cursor.next = Some(url.into());
        self
    }

    pub fn set_last_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.cursor.last = Some(url.into());
        self
    }

    /// Replaces the metadata attached as `_meta`.
    pub fn set_meta(&mut self, meta: Map<String, Value>) -> &mut Self {
        self.meta = meta;
        self
    }

    /// Adds one metadata entry, replacing any entry with the same key.
    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// Transforms a tree into a HAL document.
    ///
    /// Fails with [`HalError::NoMappings`] before looking at the tree when no
    /// user mapping is registered.
    pub fn transform(&self, node: Node) -> Result<Value> {
        if self.mapper.is_empty() {
            return Err(HalError::NoMappings);
        }

        let mut embedder = Embedder::new(&self.mapper);
        let mut document = match node {
            Node::List(items) => {
                debug!(mappings = self.mapper.len(), items = items.len(), "transforming collection");
                self.transform_collection(items, &mut embedder)
            }
            node => {
                debug!(mappings = self.mapper.len(), class = node.type_name(), "transforming resource");
                self.transform_root(node, &mut embedder)
            }
        };
        attach_meta(&mut document, &self.meta);
        Ok(document)
    }

    fn transform_root(&self, mut node: Node, embedder: &mut Embedder<'_>) -> Value {
        rewrite_properties(&mut node, &self.mapper);

        let mapping = node.type_name().and_then(|name| self.mapper.get(name));
        if let Some(fields) = node.fields_mut() {
            embedder.embed_fields(fields);
            let own = match mapping {
                Some(mapping) => embedder
                    .resource_links(mapping, fields)
                    .tiers(SelfPlacement::Last),
                None => vec![existing_links(fields)],
            };
            // curies last, so that auxiliary relations have registered theirs
            let mut tiers = vec![embedder.curies().to_links(), self.cursor.to_links()];
            tiers.extend(own);
            set_links(fields, merge_links(tiers));
        }
        finalize(node)
    }

    fn transform_collection(&self, items: Vec<Node>, embedder: &mut Embedder<'_>) -> Value {
        let total = items.len();
        let embedded: Vec<Value> = items
            .into_iter()
            .map(|item| self.transform_element(item, embedder))
            .collect();

        let mut wrapper = Map::new();
        wrapper.insert(keys::TOTAL.to_string(), Value::from(total));
        wrapper.insert(keys::EMBEDDED.to_string(), Value::Array(embedded));

        let links = prune_links(merge_links([
            embedder.curies().to_links(),
            self.cursor.to_links(),
        ]));
        if !links.is_empty() {
            wrapper.insert(keys::LINKS.to_string(), Node::Map(links).into_value());
        }
        Value::Object(wrapper)
    }

    fn transform_element(&self, mut item: Node, embedder: &mut Embedder<'_>) -> Value {
        rewrite_properties(&mut item, &self.mapper);
        let mapper = &self.mapper;
        match (item.type_name().and_then(|name| mapper.get(name)), &mut item) {
            (Some(mapping), Node::Resource(resource)) => {
                embedder.finish_resource(resource, mapping, SelfPlacement::Last);
            }
            (_, other) => embedder.walk(other),
        }
        finalize(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Mapping;
    use crate::node::Resource;
    use serde_json::json;

    fn transformer() -> HalTransformer {
        HalTransformer::new(Mapper::new().with(Mapping::new("Post", "/post/{postId}", ["postId"])))
    }

    fn post(id: i64) -> Node {
        Node::from(
            Resource::new("Post")
                .with_field("postId", id)
                .with_field("title", format!("post title {}", id)),
        )
    }

    #[test]
    fn test_no_mappings_fails_fast() {
        let mut mapper = Mapper::new();
        mapper.register_pagination();
        let result = HalTransformer::new(mapper).transform(Node::null());
        assert!(matches!(result, Err(HalError::NoMappings)));
    }

    #[test]
    fn test_root_resource_gets_self_and_cursor_links() -> Result<()> {
        let mut transformer = transformer();
        transformer.set_first_url("/post?page=1").set_next_url("");

        let document = transformer.transform(post(1))?;
        assert_eq!(
            document,
            json!({
                "post_id": 1,
                "title": "post title 1",
                "_links": {"first": {"href": "/post?page=1"}, "self": {"href": "/post/1"}}
            })
        );
        Ok(())
    }

    #[test]
    fn test_collection_is_wrapped() -> Result<()> {
        let mut transformer = transformer();
        transformer.set_self_url("/post?page=1").add_meta("count", 2);

        let document = transformer.transform(Node::List(vec![post(1), post(2), Node::from("x")]))?;
        assert_eq!(
            document,
            json!({
                "total": 3,
                "_embedded": [
                    {"post_id": 1, "title": "post title 1", "_links": {"self": {"href": "/post/1"}}},
                    {"post_id": 2, "title": "post title 2", "_links": {"self": {"href": "/post/2"}}},
                    "x"
                ],
                "_links": {"self": {"href": "/post?page=1"}},
                "_meta": {"count": 2}
            })
        );
        Ok(())
    }

    #[test]
    fn test_unmapped_root_keeps_existing_links() -> Result<()> {
        let node = Node::from(
            Resource::new("Envelope")
                .with_field("kind", "page")
                .with_field("_links", Node::from_value(json!({"next": {"href": "/p/2"}, "prev": null}))),
        );
        let document = transformer().transform(node)?;
        assert_eq!(
            document,
            json!({"kind": "page", "_links": {"next": {"href": "/p/2"}}})
        );
        Ok(())
    }

    #[test]
    fn test_curies_do_not_leak_between_calls() -> Result<()> {
        let transformer = HalTransformer::new(
            Mapper::new()
                .with(Mapping::new("Post", "/post/{postId}", ["postId"]))
                .with(
                    Mapping::new("User", "/users/{userId}", ["userId"])
                        .with_curie("example", "/docs/{rel}"),
                ),
        );
        let with_author = Node::from(
            Resource::new("Post")
                .with_field("postId", 1i64)
                .with_field("author", Resource::new("User").with_field("userId", 3i64)),
        );

        let first = transformer.transform(with_author)?;
        assert!(first["_links"]["curies"].is_array());

        let second = transformer.transform(post(2))?;
        assert_eq!(second["_links"], json!({"self": {"href": "/post/2"}}));
        Ok(())
    }
}
