//! Curie accumulation for one top-level transform.

use crate::keys;
use crate::links::Link;
use crate::mapping::{Curie, Mapping};
use crate::node::{Fields, Node};
use indexmap::IndexMap;

/// Curie definitions collected while walking one document.
///
/// Definitions are deduplicated by name; the first registration fixes the
/// output position and a later one with the same name replaces its href.
#[derive(Debug, Clone, Default)]
pub struct CurieRegistry {
    curies: IndexMap<String, Curie>,
}

impl CurieRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, curie: &Curie) {
        if curie.name.is_empty() {
            return;
        }
        self.curies.insert(curie.name.clone(), curie.clone());
    }

    /// Registers the curie of a mapped type, if it has one.
    pub fn register_for(&mut self, mapping: &Mapping) {
        if let Some(curie) = mapping.curie() {
            self.register(curie);
        }
    }

    pub fn len(&self) -> usize {
        self.curies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curies.is_empty()
    }

    /// The `curies` link tier: empty, or a single `curies` list of
    /// `{name, href, templated: true}` objects.
    pub fn to_links(&self) -> Fields {
        let mut links = Fields::new();
        if self.is_empty() {
            return links;
        }
        let list = self
            .curies
            .values()
            .map(|curie| {
                Link::new(curie.href.as_str())
                    .templated()
                    .with_name(curie.name.as_str())
                    .to_node()
            })
            .collect();
        links.insert(keys::CURIES.to_string(), Node::List(list));
        links
    }
}

/// Relation name for `rel` on a type: `curie:snake_case(rel)` when the type
/// declares a curie, `rel` unchanged otherwise.
pub fn prefixed_rel(mapping: &Mapping, rel: &str) -> String {
    match mapping.curie() {
        Some(curie) => format!("{}:{}", curie.name, crate::case::camel_to_snake(rel)),
        None => rel.to_string(),
    }
}
