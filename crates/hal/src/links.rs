//! Link objects and `_links` assembly.
//!
//! A `_links` map is built from tiers merged in order. A later tier replaces
//! the value of a relation an earlier tier already set, but the relation
//! keeps the position where it first appeared. After merging, empty entries
//! are pruned and an empty map is dropped from its node.

use crate::keys;
use crate::node::{Fields, Node, Scalar};
use serde::{Deserialize, Serialize};

/// A HAL link object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Default::default()
        }
    }

    pub fn templated(mut self) -> Self {
        self.templated = Some(true);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The link as a tree node. Absent attributes are left out, so a bare
    /// link is `{href}`. A `name` leads, as curie entries are written
    /// `{name, href, templated}`.
    pub fn to_node(&self) -> Node {
        let mut fields = Fields::new();
        if let Some(name) = &self.name {
            fields.insert(keys::NAME.to_string(), Node::from(name.as_str()));
        }
        fields.insert(keys::HREF.to_string(), Node::from(self.href.as_str()));
        if let Some(templated) = self.templated {
            fields.insert(keys::TEMPLATED.to_string(), Node::from(templated));
        }
        let optional = [
            (keys::TYPE, &self.media_type),
            (keys::PROFILE, &self.profile),
            (keys::TITLE, &self.title),
            (keys::HREF_LANG, &self.hreflang),
            (keys::DEPRECATION, &self.deprecation),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), Node::from(value.as_str()));
            }
        }
        Node::Map(fields)
    }
}

/// Caller-configured navigation links, emitted at the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorLinks {
    pub self_url: Option<String>,
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl CursorLinks {
    /// Links in `self`, `first`, `prev`, `next`, `last` order. Unset and
    /// empty URLs are skipped.
    pub fn to_links(&self) -> Fields {
        [
            (keys::SELF, &self.self_url),
            (keys::FIRST, &self.first),
            (keys::PREV, &self.prev),
            (keys::NEXT, &self.next),
            (keys::LAST, &self.last),
        ]
        .into_iter()
        .filter_map(|(rel, url)| {
            url.as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| (rel.to_string(), Node::href(url)))
        })
        .collect()
    }
}

/// Merges link tiers in order.
pub fn merge_links<I>(tiers: I) -> Fields
where
    I: IntoIterator<Item = Fields>,
{
    let mut links = Fields::new();
    for tier in tiers {
        for (rel, link) in tier {
            links.insert(rel, link);
        }
    }
    links
}

/// True for values that must not appear in `_links`.
fn is_empty_link(node: &Node) -> bool {
    match node {
        Node::Scalar(Scalar::Null) | Node::Scalar(Scalar::Bool(false)) => true,
        Node::Scalar(Scalar::String(s)) => s.is_empty(),
        Node::Scalar(_) => false,
        Node::List(items) => items.is_empty(),
        Node::Map(_) | Node::Resource(_) => match node.fields() {
            Some(fields) if fields.is_empty() => true,
            Some(fields) => match fields.get(keys::HREF) {
                Some(Node::Scalar(Scalar::String(href))) => href.is_empty(),
                Some(Node::Scalar(Scalar::Null)) => true,
                _ => false,
            },
            None => false,
        },
    }
}

/// Drops empty relations.
pub fn prune_links(links: Fields) -> Fields {
    links
        .into_iter()
        .filter(|(_, link)| !is_empty_link(link))
        .collect()
}

/// The `_links` already present on a node, as a tier.
pub fn existing_links(fields: &Fields) -> Fields {
    fields
        .get(keys::LINKS)
        .and_then(Node::fields)
        .cloned()
        .unwrap_or_default()
}

/// Prunes `links` and stores them as `_links`, or removes `_links` when
/// nothing is left. An existing `_links` keeps its position.
pub fn set_links(fields: &mut Fields, links: Fields) {
    let links = prune_links(links);
    if links.is_empty() {
        fields.shift_remove(keys::LINKS);
    } else {
        fields.insert(keys::LINKS.to_string(), Node::Map(links));
    }
}

/// Adds one relation to the node's `_links`, creating the map at the end if
/// needed. A `_links` value that is not a map is left alone.
pub fn add_link(fields: &mut Fields, rel: String, link: Node) {
    let links = fields
        .entry(keys::LINKS.to_string())
        .or_insert_with(|| Node::Map(Fields::new()));
    if let Some(links) = links.fields_mut() {
        links.insert(rel, link);
    }
}
