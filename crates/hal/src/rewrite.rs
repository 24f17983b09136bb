//! Property rewrite stage: per-type hiding and renaming, applied before
//! embedding.

use crate::mapping::Mapper;
use crate::node::{Fields, Node};
use tracing::trace;

/// Hides and renames properties of every mapped resource in the tree.
pub fn rewrite_properties(node: &mut Node, mapper: &Mapper) {
    match node {
        Node::Resource(resource) => {
            if let Some(mapping) = mapper.get(&resource.type_name) {
                for hidden in mapping.hidden_properties() {
                    if resource.fields.shift_remove(hidden).is_some() {
                        trace!(class = %resource.type_name, property = %hidden, "hid property");
                    }
                }
                for (from, to) in mapping.aliased_properties() {
                    rename_field(&mut resource.fields, from, to);
                }
            }
            for child in resource.fields.values_mut() {
                rewrite_properties(child, mapper);
            }
        }
        Node::Map(fields) => {
            for child in fields.values_mut() {
                rewrite_properties(child, mapper);
            }
        }
        Node::List(items) => {
            for item in items {
                rewrite_properties(item, mapper);
            }
        }
        Node::Scalar(_) => {}
    }
}

/// Renames `from` to `to` in place. A field already named `to` is replaced.
fn rename_field(fields: &mut Fields, from: &str, to: &str) {
    if from == to {
        return;
    }
    let Some(index) = fields.get_index_of(from) else {
        return;
    };
    if let Some((_, value)) = fields.shift_remove_index(index) {
        fields.shift_remove(to);
        let index = index.min(fields.len());
        fields.shift_insert(index, to.to_string(), value);
    }
}
