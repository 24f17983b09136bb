//! # Helios HAL
//!
//! This crate turns arbitrary object graphs into
//! [HAL](https://datatracker.ietf.org/doc/html/draft-kelly-json-hal) hypermedia
//! documents, rendered as HAL+JSON or HAL+XML.
//!
//! ## Features
//!
//! - **Mappings**: Per-type rules for URL templates, identifier properties,
//!   property renames, hidden properties and curies.
//! - **Embedding**: Nested mapped resources are moved under `_embedded` and
//!   linked from their parent.
//! - **Links**: Self, auxiliary, cursor (`first`/`prev`/`next`/`last`) and curie
//!   links are merged and pruned per resource.
//! - **Renderers**: JSON through `serde_json`, XML through `quick-xml`.
//!
//! ## Architecture
//!
//! ```text
//! T: Serialize ─► to_node ─► HalTransformer::transform ─► Renderer::render
//!                 (Node)      (serde_json::Value)            (String)
//! ```
//!
//! - **Producer**: [`to_node`] is a `serde::Serializer` building a
//!   type-tagged [`Node`] tree. Trees can also be read from tagged JSON with
//!   [`Node::from_tagged_json`].
//! - **Transformer**: [`HalTransformer`] rewrites properties, embeds resources,
//!   assembles links and lowers the tree into a snake_cased document.
//! - **Renderers**: [`JsonRenderer`] and, with the `xml` feature,
//!   [`xml::XmlRenderer`] encode the finished document.
//!
//! ## Examples
//!
//! ```
//! use helios_hal::{HalSerializer, HalTransformer, JsonRenderer, Mapper, Mapping};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct User {
//!     user_id: u32,
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Post {
//!     post_id: u32,
//!     author: User,
//! }
//!
//! let mapper = Mapper::new()
//!     .with(Mapping::new("Post", "/posts/{postId}", ["postId"]))
//!     .with(Mapping::new("User", "/users/{userId}", ["userId"]));
//! let serializer = HalSerializer::new(HalTransformer::new(mapper), JsonRenderer::new());
//!
//! let post = Post { post_id: 1, author: User { user_id: 7, name: "Ana".into() } };
//! let json: serde_json::Value = serde_json::from_str(&serializer.serialize(&post)?)?;
//!
//! assert_eq!(json["_embedded"]["author"]["_links"]["self"]["href"], "/users/7");
//! assert_eq!(json["_links"]["author"]["href"], "/users/7");
//! # Ok::<(), helios_hal::HalError>(())
//! ```

pub mod case;
pub mod curies;
pub mod embed;
pub mod error;
pub mod json;
pub mod keys;
pub mod links;
pub mod mapping;
pub mod node;
pub mod pagination;
pub mod postprocess;
pub mod rewrite;
pub mod serializer;
pub mod transformer;
pub mod url;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export common types
pub use error::{HalError, Result};
pub use links::{CursorLinks, Link};
pub use mapping::{Curie, Mapper, Mapping, MappingConfig};
pub use node::{Node, Resource, Scalar, to_node};
pub use pagination::HalPagination;
pub use serializer::{HalSerializer, Renderer, media_type};
pub use transformer::HalTransformer;

// Re-export renderers and their convenience functions
pub use json::{HalJsonSerializer, JsonRenderer, to_hal_json_string, to_hal_json_string_pretty};

#[cfg(feature = "xml")]
pub use xml::{HalXmlSerializer, XmlRenderer, to_hal_xml_string};
