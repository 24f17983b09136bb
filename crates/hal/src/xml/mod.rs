//! HAL+XML rendering.
//!
//! The XML renderer walks the same finalized document the JSON renderer
//! encodes, so both formats agree on links, embedded resources and
//! metadata.
//!
//! ## HAL JSON ↔ XML Mapping
//!
//! ### Resources
//!
//! A document, list item or embedded object with a self link becomes a
//! `<resource>` element carrying the self `href`. Embedded objects keyed by
//! name also carry that name as `rel`:
//!
//! ```json
//! {"_embedded": {"author": {"user_id": 1, "_links": {"self": {"href": "/users/1"}}}}}
//! ```
//!
//! ```xml
//! <resource>
//!   <embedded>
//!     <resource href="/users/1" rel="author">
//!       <user_id><![CDATA[1]]></user_id>
//!       <links>
//!         <link rel="self" href="/users/1"/>
//!       </links>
//!     </resource>
//!   </embedded>
//! </resource>
//! ```
//!
//! ### Links
//!
//! Objects with an `href` become `<link>` elements. `href`, `hreflang`,
//! `title` and `type` are attributes; any other member (`name` and
//! `templated` on curies) is a child element.
//!
//! ### Everything else
//!
//! - Leading underscores are dropped from element names (`_links` → `<links>`).
//! - List items and numeric keys are written as `<resource>`.
//! - Scalars are CDATA sections; booleans render as `true`/`false` and nulls
//!   as empty sections.
//! - Empty lists and objects are self-closing elements.

pub mod ser;
mod utils;

pub use ser::{
    HalXmlSerializer, XmlRenderer, to_hal_xml_string, to_xml_string, to_xml_writer,
};
