//! Embedding resolution.
//!
//! Walks a rewritten tree and moves every nested resource of a mapped type
//! under its parent's `_embedded` map, keyed by the field it was found in.
//! Embedded resources get their own `_links` (existing links, resolved
//! `self`, auxiliary relations) and, when `self` resolved, the parent gets a
//! shortcut relation pointing at it.
//!
//! | Field value | Outcome |
//! |-------------|---------|
//! | resource of a mapped type | moved to `_embedded[field]` |
//! | resource of a mapped type, field is one of its id properties | kept in place |
//! | resource of an unmapped type, structural map | kept in place, walked |
//! | list holding mapped resources | mapped resources moved to `_embedded[field]`, the rest kept in place |
//! | list named `_embedded` | resources linked in place |
//! | other lists | kept in place, walked |

use crate::curies::{CurieRegistry, prefixed_rel};
use crate::keys;
use crate::links::{add_link, existing_links, merge_links, set_links};
use crate::mapping::{Mapper, Mapping};
use crate::node::{Fields, Node, Resource};
use crate::url::{Identifiers, TemplateContext, resolve};
use tracing::{debug, trace};

/// Where a resource's own `self` link goes among its link tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfPlacement {
    /// existing, self, auxiliary. Used for embedded resources.
    BeforeAuxiliary,
    /// existing, auxiliary, self. Used for document roots and collection items.
    Last,
}

/// Link tiers computed for one mapped resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceLinks {
    pub self_href: Option<String>,
    pub existing: Fields,
    pub auxiliary: Fields,
}

impl ResourceLinks {
    /// The tiers in merge order for the given placement.
    pub fn tiers(self, placement: SelfPlacement) -> Vec<Fields> {
        let own: Fields = self
            .self_href
            .map(|href| (keys::SELF.to_string(), Node::href(href)))
            .into_iter()
            .collect();
        match placement {
            SelfPlacement::BeforeAuxiliary => vec![self.existing, own, self.auxiliary],
            SelfPlacement::Last => vec![self.existing, self.auxiliary, own],
        }
    }
}

enum Action {
    Embed,
    EmbedList,
    LinkInPlace,
    Walk,
    Keep,
}

/// Per-transform embedding state. The curie registry lives here so that
/// nothing leaks between independent transforms.
pub struct Embedder<'a> {
    mapper: &'a Mapper,
    curies: CurieRegistry,
}

impl<'a> Embedder<'a> {
    pub fn new(mapper: &'a Mapper) -> Self {
        Self {
            mapper,
            curies: CurieRegistry::new(),
        }
    }

    pub fn curies(&self) -> &CurieRegistry {
        &self.curies
    }

    fn mapping_for(&self, node: &Node) -> Option<&'a Mapping> {
        let mapper = self.mapper;
        node.type_name().and_then(|name| mapper.get(name))
    }

    /// Walks any node, embedding inside maps and resources it contains.
    pub fn walk(&mut self, node: &mut Node) {
        match node {
            Node::Map(fields) => self.embed_fields(fields),
            Node::Resource(resource) => self.embed_fields(&mut resource.fields),
            Node::List(items) => {
                for item in items {
                    self.walk(item);
                }
            }
            Node::Scalar(_) => {}
        }
    }

    /// Resolves embedding for the fields of one map or resource.
    pub fn embed_fields(&mut self, fields: &mut Fields) {
        let names: Vec<String> = fields
            .keys()
            .filter(|name| name.as_str() != keys::LINKS)
            .cloned()
            .collect();

        for name in names {
            let Some(value) = fields.get(&name) else {
                continue;
            };
            match self.decide(&name, value, fields) {
                Action::Embed => self.embed_resource(fields, name),
                Action::EmbedList => self.embed_list(fields, name),
                Action::LinkInPlace => {
                    if let Some(Node::List(items)) = fields.get_mut(&name) {
                        for item in items {
                            self.link_in_place(item);
                        }
                    }
                }
                Action::Walk => {
                    if let Some(value) = fields.get_mut(&name) {
                        self.walk(value);
                    }
                }
                Action::Keep => {}
            }
        }
    }

    fn decide(&mut self, name: &str, value: &Node, fields: &Fields) -> Action {
        let can_embed = matches!(fields.get(keys::EMBEDDED), None | Some(Node::Map(_)));
        let mapper = self.mapper;
        match value {
            Node::Resource(resource) => match mapper.get(&resource.type_name) {
                Some(mapping) if mapping.id_properties().iter().any(|id| id == name) => {
                    trace!(field = name, class = %resource.type_name, "identifier field kept in place");
                    self.curies.register_for(mapping);
                    Action::Keep
                }
                Some(_) if can_embed => Action::Embed,
                Some(_) => Action::Walk,
                None => {
                    debug!(field = name, class = %resource.type_name, "no mapping, rendering in place");
                    Action::Walk
                }
            },
            Node::List(_) if name == keys::EMBEDDED => Action::LinkInPlace,
            Node::List(items)
                if can_embed && items.iter().any(|item| self.mapping_for(item).is_some()) =>
            {
                Action::EmbedList
            }
            Node::List(_) | Node::Map(_) => Action::Walk,
            Node::Scalar(_) => Action::Keep,
        }
    }

    fn embed_resource(&mut self, fields: &mut Fields, name: String) {
        let Some(Node::Resource(mut child)) = fields.shift_remove(&name) else {
            return;
        };
        let mapper = self.mapper;
        let Some(mapping) = mapper.get(&child.type_name) else {
            return;
        };
        trace!(field = %name, class = %child.type_name, "embedding resource");

        let self_href = self.finish_resource(&mut child, mapping, SelfPlacement::BeforeAuxiliary);
        insert_embedded(fields, name.clone(), Node::Resource(child));

        if let Some(href) = self_href {
            add_link(fields, prefixed_rel(mapping, &name), Node::href(href));
        }
    }

    /// Moves the mapped resources of a list to `_embedded[name]`. Every
    /// other element stays in the original field, walked, and the field is
    /// removed only when nothing is left in it.
    fn embed_list(&mut self, fields: &mut Fields, name: String) {
        let Some((index, _, Node::List(items))) = fields.shift_remove_full(&name) else {
            return;
        };
        trace!(field = %name, len = items.len(), "embedding resource list");

        let mapper = self.mapper;
        let mut embedded = Vec::with_capacity(items.len());
        let mut remaining = Vec::new();
        for item in items {
            match item {
                Node::Resource(mut child) => match mapper.get(&child.type_name) {
                    Some(mapping) => {
                        self.finish_resource(&mut child, mapping, SelfPlacement::BeforeAuxiliary);
                        embedded.push(Node::Resource(child));
                    }
                    None => {
                        debug!(field = %name, class = %child.type_name, "no mapping, rendering list element in place");
                        let mut node = Node::Resource(child);
                        self.walk(&mut node);
                        remaining.push(node);
                    }
                },
                mut other => {
                    self.walk(&mut other);
                    remaining.push(other);
                }
            }
        }

        if !remaining.is_empty() {
            fields.shift_insert(index, name.clone(), Node::List(remaining));
        }
        insert_embedded(fields, name, Node::List(embedded));
    }

    /// Links a mapped resource where it stands; other nodes are walked.
    fn link_in_place(&mut self, node: &mut Node) {
        match (self.mapping_for(node), node) {
            (Some(mapping), Node::Resource(resource)) => {
                self.finish_resource(resource, mapping, SelfPlacement::BeforeAuxiliary);
            }
            (_, node) => self.walk(node),
        }
    }

    /// Embeds inside `resource`, then sets its `_links` and registers its
    /// curie. Returns the resolved `self` href.
    pub fn finish_resource(
        &mut self,
        resource: &mut Resource,
        mapping: &Mapping,
        placement: SelfPlacement,
    ) -> Option<String> {
        self.embed_fields(&mut resource.fields);
        let links = self.resource_links(mapping, &resource.fields);
        let self_href = links.self_href.clone();
        set_links(&mut resource.fields, merge_links(links.tiers(placement)));
        self.curies.register_for(mapping);
        self_href
    }

    /// Computes the link tiers of a mapped resource.
    ///
    /// Auxiliary relations are all-or-nothing: if none of the type's
    /// non-`self` templates resolves, none is emitted. Emitting a
    /// curie-prefixed relation registers the type's curie.
    pub fn resource_links(&mut self, mapping: &Mapping, fields: &Fields) -> ResourceLinks {
        let ids = Identifiers::collect(mapping, fields);
        let ctx = TemplateContext::new(mapping, &ids);

        let self_href = resolve(mapping.self_url(), &ctx);
        if self_href.is_none() {
            debug!(class = mapping.class_name(), template = mapping.self_url(), "self url did not resolve");
        }

        let resolved: Vec<(&String, Option<String>)> = mapping
            .urls()
            .iter()
            .map(|(rel, template)| (rel, resolve(template, &ctx)))
            .collect();

        let mut auxiliary = Fields::new();
        if resolved.iter().any(|(_, href)| href.is_some()) {
            for ((rel, href), template) in resolved.into_iter().zip(mapping.urls().values()) {
                let href = href.unwrap_or_else(|| template.clone());
                auxiliary.insert(prefixed_rel(mapping, rel), Node::href(href));
            }
            self.curies.register_for(mapping);
        }

        ResourceLinks {
            self_href,
            existing: existing_links(fields),
            auxiliary,
        }
    }

    pub fn into_curies(self) -> CurieRegistry {
        self.curies
    }
}

/// Stores `node` as `_embedded[name]`, creating `_embedded` at the end.
fn insert_embedded(fields: &mut Fields, name: String, node: Node) {
    let embedded = fields
        .entry(keys::EMBEDDED.to_string())
        .or_insert_with(|| Node::Map(Fields::new()));
    if let Node::Map(embedded) = embedded {
        embedded.insert(name, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapper() -> Mapper {
        Mapper::new()
            .with(
                Mapping::new("User", "/users/{userId}", ["userId"])
                    .with_url("friends", "/users/{userId}/friends")
                    .with_curie("example", "/docs/{rel}"),
            )
            .with(Mapping::new("Comment", "/comments/{commentId}", ["commentId"]))
            .with(Mapping::new("CommentId", "/comments/{commentId}", ["commentId"]))
    }

    fn user(id: i64) -> Node {
        Node::from(
            Resource::new("User")
                .with_field("userId", Resource::new("UserId").with_field("userId", id))
                .with_field("name", "Ann"),
        )
    }

    #[test]
    fn test_mapped_resource_is_embedded_with_links() {
        let mapper = mapper();
        let mut embedder = Embedder::new(&mapper);
        let mut post = Fields::new();
        post.insert("title".to_string(), Node::from("Hello"));
        post.insert("author".to_string(), user(1));

        embedder.embed_fields(&mut post);

        assert_eq!(
            Node::Map(post).into_value(),
            json!({
                "title": "Hello",
                "_embedded": {
                    "author": {
                        "userId": {"userId": 1},
                        "name": "Ann",
                        "_links": {
                            "self": {"href": "/users/1"},
                            "example:friends": {"href": "/users/1/friends"}
                        }
                    }
                },
                "_links": {"example:author": {"href": "/users/1"}}
            })
        );
        assert_eq!(embedder.curies().len(), 1);
    }

    #[test]
    fn test_identifier_field_stays_in_place() {
        let mapper = mapper();
        let mut embedder = Embedder::new(&mapper);
        let mut comment = Resource::new("Comment")
            .with_field("commentId", Resource::new("CommentId").with_field("commentId", 1000i64));

        let href = embedder.finish_resource(
            &mut comment,
            mapper.get("Comment").unwrap(),
            SelfPlacement::BeforeAuxiliary,
        );

        assert_eq!(href.as_deref(), Some("/comments/1000"));
        assert_eq!(
            Node::from(comment).into_value(),
            json!({"commentId": {"commentId": 1000}, "_links": {"self": {"href": "/comments/1000"}}})
        );
    }

    #[test]
    fn test_list_of_resources_is_embedded() {
        let mapper = mapper();
        let mut embedder = Embedder::new(&mapper);
        let mut post = Fields::new();
        post.insert(
            "comments".to_string(),
            Node::List(vec![Node::from(
                Resource::new("Comment")
                    .with_field("commentId", 7i64)
                    .with_field("user", user(2)),
            )]),
        );

        embedder.embed_fields(&mut post);

        assert_eq!(
            Node::Map(post).into_value(),
            json!({
                "_embedded": {
                    "comments": [{
                        "commentId": 7,
                        "_embedded": {
                            "user": {
                                "userId": {"userId": 2},
                                "name": "Ann",
                                "_links": {
                                    "self": {"href": "/users/2"},
                                    "example:friends": {"href": "/users/2/friends"}
                                }
                            }
                        },
                        "_links": {
                            "example:user": {"href": "/users/2"},
                            "self": {"href": "/comments/7"}
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_mixed_list_keeps_unmapped_elements() {
        let mapper = mapper();
        let mut embedder = Embedder::new(&mapper);
        let mut post = Fields::new();
        post.insert("postId".to_string(), Node::from(1i64));
        post.insert(
            "items".to_string(),
            Node::List(vec![
                Node::from(Resource::new("Comment").with_field("commentId", 2i64)),
                Node::from(
                    Resource::new("Tag")
                        .with_field("label", "rust")
                        .with_field("author", user(3)),
                ),
                Node::from("loose"),
            ]),
        );
        post.insert("title".to_string(), Node::from("Hello"));

        embedder.embed_fields(&mut post);

        assert_eq!(
            post.keys().collect::<Vec<_>>(),
            vec!["postId", "items", "title", "_embedded"]
        );
        assert_eq!(
            Node::Map(post).into_value(),
            json!({
                "postId": 1,
                "items": [
                    {
                        "label": "rust",
                        "_embedded": {
                            "author": {
                                "userId": {"userId": 3},
                                "name": "Ann",
                                "_links": {
                                    "self": {"href": "/users/3"},
                                    "example:friends": {"href": "/users/3/friends"}
                                }
                            }
                        },
                        "_links": {"example:author": {"href": "/users/3"}}
                    },
                    "loose"
                ],
                "title": "Hello",
                "_embedded": {
                    "items": [{"commentId": 2, "_links": {"self": {"href": "/comments/2"}}}]
                }
            })
        );
    }

    #[test]
    fn test_kept_identifier_registers_its_curie() {
        let mapper = Mapper::new()
            .with(Mapping::new("Comment", "/comments/{commentId}", ["commentId"]))
            .with(
                Mapping::new("CommentId", "/comments/{commentId}", ["commentId"])
                    .with_curie("notes", "/docs/notes/{rel}"),
            );
        let mut embedder = Embedder::new(&mapper);
        let mut comment = Fields::new();
        comment.insert(
            "commentId".to_string(),
            Node::from(Resource::new("CommentId").with_field("commentId", 4i64)),
        );

        embedder.embed_fields(&mut comment);

        assert!(comment.contains_key("commentId"));
        assert!(!comment.contains_key(keys::EMBEDDED));
        assert_eq!(embedder.curies().len(), 1);
    }

    #[test]
    fn test_unmapped_and_structural_values_stay_in_place() {
        let mapper = mapper();
        let mut embedder = Embedder::new(&mapper);
        let mut fields = Fields::new();
        fields.insert(
            "dates".to_string(),
            Node::from_value(json!({"created_at": "2015-07-18"})),
        );
        fields.insert(
            "tag".to_string(),
            Node::from(Resource::new("Tag").with_field("label", "rust")),
        );
        fields.insert(
            "scores".to_string(),
            Node::List(vec![Node::from(1i64), Node::from(2i64)]),
        );
        let before = Node::Map(fields.clone()).into_value();

        embedder.embed_fields(&mut fields);

        assert_eq!(Node::Map(fields).into_value(), before);
        assert!(embedder.curies().is_empty());
    }

    #[test]
    fn test_pagination_list_is_linked_in_place() {
        let mapper = mapper();
        let mut embedder = Embedder::new(&mapper);
        let mut page = Fields::new();
        page.insert("total".to_string(), Node::from(1i64));
        page.insert(
            "_embedded".to_string(),
            Node::List(vec![Node::from(Resource::new("Comment").with_field("commentId", 5i64))]),
        );

        embedder.embed_fields(&mut page);

        assert_eq!(
            Node::Map(page).into_value(),
            json!({
                "total": 1,
                "_embedded": [{"commentId": 5, "_links": {"self": {"href": "/comments/5"}}}]
            })
        );
    }

    #[test]
    fn test_auxiliary_links_are_all_or_nothing() {
        let mapping = Mapping::new("Post", "/posts/{postId}", ["postId"])
            .with_url("comments", "/posts/{postId}/comments")
            .with_url("feed", "/feed");
        let mapper = Mapper::new().with(mapping.clone());
        let mut embedder = Embedder::new(&mapper);

        let with_id = Resource::new("Post").with_field("postId", 9i64);
        let links = embedder.resource_links(&mapping, &with_id.fields);
        assert_eq!(
            links.auxiliary.keys().collect::<Vec<_>>(),
            vec!["comments", "feed"]
        );

        let without_id = Resource::new("Post");
        let links = embedder.resource_links(&mapping, &without_id.fields);
        assert!(links.auxiliary.is_empty());
        assert_eq!(links.self_href, None);
    }

    #[test]
    fn test_self_placement() {
        let links = ResourceLinks {
            self_href: Some("/x".to_string()),
            existing: Fields::new(),
            auxiliary: Fields::from([("example:feed".to_string(), Node::href("/feed"))]),
        };
        let merged = merge_links(links.clone().tiers(SelfPlacement::Last));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["example:feed", "self"]);
        let merged = merge_links(links.tiers(SelfPlacement::BeforeAuxiliary));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["self", "example:feed"]);
    }
}
