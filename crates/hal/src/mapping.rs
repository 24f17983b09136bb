//! Per-type mapping configuration and the registry that looks it up.
//!
//! A [`Mapping`] tells the engine how to treat one type: which fields hold
//! its identifier, the URL templates for its `self` link and auxiliary
//! relations, how to rename or hide its properties, and which curie prefixes
//! its relations.
//!
//! Mappings are usually loaded from data:
//!
//! ```json
//! {
//!   "class": "app::model::Post",
//!   "alias": "Message",
//!   "aliased_properties": {"title": "headline"},
//!   "hide_properties": [],
//!   "id_properties": ["postId"],
//!   "urls": {
//!     "self": "http://example.com/posts/{postId}",
//!     "comments": "http://example.com/posts/{postId}/comments"
//!   },
//!   "curies": {"name": "example", "href": "http://example.com/docs/rels/{rel}"}
//! }
//! ```

use crate::error::{HalError, Result};
use crate::keys;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Type name of the built-in pagination container.
pub const PAGINATION_CLASS: &str = "HalPagination";

/// A compact URI prefix declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curie {
    pub name: String,
    pub href: String,
}

impl Curie {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

/// How one type is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    class_name: String,
    class_alias: Option<String>,
    id_properties: Vec<String>,
    self_url: String,
    urls: IndexMap<String, String>,
    aliased_properties: IndexMap<String, String>,
    hidden_properties: Vec<String>,
    curie: Option<Curie>,
    synthetic: bool,
}

impl Mapping {
    /// Creates a mapping with its mandatory `self` URL template.
    ///
    /// `id_properties` must be listed in the order their placeholders are
    /// expected to appear in the templates.
    pub fn new<I, S>(class_name: impl Into<String>, self_url: impl Into<String>, id_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class_name: class_name.into(),
            class_alias: None,
            id_properties: id_properties.into_iter().map(Into::into).collect(),
            self_url: self_url.into(),
            urls: IndexMap::new(),
            aliased_properties: IndexMap::new(),
            hidden_properties: Vec::new(),
            curie: None,
            synthetic: false,
        }
    }

    /// Mapping for the pagination container.
    ///
    /// Its identifier and `self` template never produce a link; it only
    /// exists so that the container is recognized as a known type.
    pub fn pagination() -> Self {
        let mut mapping = Self::new(PAGINATION_CLASS, "http://example.com", [keys::TOTAL]);
        mapping.synthetic = true;
        mapping
    }

    /// Builds a mapping from its data form.
    pub fn from_config(config: MappingConfig) -> Result<Self> {
        if config.class.trim().is_empty() {
            return Err(HalError::InvalidMapping {
                class: config.class,
                reason: "empty class name".to_string(),
            });
        }

        let mut urls = config.urls;
        let self_url = match urls.shift_remove(keys::SELF) {
            Some(url) if !url.is_empty() => url,
            _ => {
                return Err(HalError::InvalidMapping {
                    class: config.class,
                    reason: format!("missing `{}` url", keys::SELF),
                });
            }
        };

        let mut mapping = Self::new(config.class, self_url, config.id_properties);
        mapping.urls = urls;
        mapping.aliased_properties = config.aliased_properties;
        mapping.hidden_properties = config.hide_properties;
        if let Some(alias) = config.alias {
            mapping = mapping.with_alias(alias);
        }
        if let Some(curie) = config.curies {
            mapping = mapping.with_curie(curie.name, curie.href);
        }
        Ok(mapping)
    }

    /// Sets the class alias used by URL templating. An empty alias clears it.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.class_alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Adds a relation URL template. A `self` relation replaces the self template.
    pub fn with_url(mut self, rel: impl Into<String>, template: impl Into<String>) -> Self {
        let rel = rel.into();
        if rel == keys::SELF {
            self.self_url = template.into();
        } else {
            self.urls.insert(rel, template.into());
        }
        self
    }

    /// Renames a property. The value keeps its position among the fields.
    pub fn with_property_alias(mut self, property: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliased_properties.insert(property.into(), alias.into());
        self
    }

    pub fn with_hidden_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_properties
            .extend(properties.into_iter().map(Into::into));
        self
    }

    /// Sets the curie. An empty name clears it.
    pub fn with_curie(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        let curie = Curie::new(name, href);
        self.curie = (!curie.name.is_empty()).then_some(curie);
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The unqualified type name (`Post` for `app::model::Post`).
    pub fn short_name(&self) -> &str {
        short_name(&self.class_name)
    }

    pub fn class_alias(&self) -> Option<&str> {
        self.class_alias.as_deref()
    }

    pub fn id_properties(&self) -> &[String] {
        &self.id_properties
    }

    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    /// Auxiliary relation templates, without `self`, in declaration order.
    pub fn urls(&self) -> &IndexMap<String, String> {
        &self.urls
    }

    pub fn aliased_properties(&self) -> &IndexMap<String, String> {
        &self.aliased_properties
    }

    /// The field name a property carries after renaming.
    pub fn property_name<'a>(&'a self, property: &'a str) -> &'a str {
        self.aliased_properties
            .get(property)
            .map(String::as_str)
            .unwrap_or(property)
    }

    pub fn hidden_properties(&self) -> &[String] {
        &self.hidden_properties
    }

    pub fn curie(&self) -> Option<&Curie> {
        self.curie.as_ref()
    }

    /// True for mappings the engine registers for itself.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

/// Data form of a [`Mapping`], as found in mapping files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub class: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub aliased_properties: IndexMap<String, String>,
    #[serde(default)]
    pub hide_properties: Vec<String>,
    #[serde(default)]
    pub id_properties: Vec<String>,
    /// Relation templates. `self` is mandatory.
    #[serde(default)]
    pub urls: IndexMap<String, String>,
    #[serde(default, deserialize_with = "curie_or_none")]
    pub curies: Option<Curie>,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// `{}` and a curie without a name both mean "no curie".
fn curie_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<Curie>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct PartialCurie {
        #[serde(default)]
        name: String,
        #[serde(default)]
        href: String,
    }

    let value = Option::<PartialCurie>::deserialize(deserializer)?;
    Ok(value
        .filter(|curie| !curie.name.is_empty())
        .map(|curie| Curie::new(curie.name, curie.href)))
}

/// Returns the text after the last `::`, `\` or `.` separator.
pub fn short_name(type_name: &str) -> &str {
    type_name
        .rsplit([':', '\\', '.'])
        .next()
        .unwrap_or(type_name)
}

/// Registry of mappings keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    mappings: IndexMap<String, Mapping>,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from mapping definitions.
    pub fn from_configs<I>(configs: I) -> Result<Self>
    where
        I: IntoIterator<Item = MappingConfig>,
    {
        let mut mapper = Self::new();
        for config in configs {
            mapper.add(Mapping::from_config(config)?);
        }
        Ok(mapper)
    }

    /// Parses a JSON array of mapping definitions.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let configs: Vec<MappingConfig> = serde_json::from_str(s)?;
        Self::from_configs(configs)
    }

    /// Registers a mapping, replacing any previous one for the same type.
    pub fn add(&mut self, mapping: Mapping) -> &mut Self {
        self.mappings
            .insert(mapping.class_name().to_string(), mapping);
        self
    }

    pub fn with(mut self, mapping: Mapping) -> Self {
        self.add(mapping);
        self
    }

    /// Registers the pagination container unless a mapping for it exists.
    pub fn register_pagination(&mut self) {
        if self.get(PAGINATION_CLASS).is_none() {
            self.add(Mapping::pagination());
        }
    }

    /// Looks a type up by its exact name, then by its unqualified name.
    pub fn get(&self, type_name: &str) -> Option<&Mapping> {
        if let Some(mapping) = self.mappings.get(type_name) {
            return Some(mapping);
        }
        let wanted = short_name(type_name);
        self.mappings
            .values()
            .find(|mapping| mapping.short_name() == wanted)
    }

    /// Number of user mappings. Synthetic mappings are not counted.
    pub fn len(&self) -> usize {
        self.mappings
            .values()
            .filter(|mapping| !mapping.is_synthetic())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.values()
    }
}
