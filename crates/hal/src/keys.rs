//! Reserved HAL member names.

pub const EMBEDDED: &str = "_embedded";
pub const LINKS: &str = "_links";
pub const META: &str = "_meta";

pub const HREF: &str = "href";
pub const TEMPLATED: &str = "templated";
pub const TYPE: &str = "type";
pub const NAME: &str = "name";
pub const PROFILE: &str = "profile";
pub const TITLE: &str = "title";
pub const HREF_LANG: &str = "hreflang";
pub const DEPRECATION: &str = "deprecation";

pub const SELF: &str = "self";
pub const FIRST: &str = "first";
pub const PREV: &str = "prev";
pub const NEXT: &str = "next";
pub const LAST: &str = "last";
pub const CURIES: &str = "curies";

/// Field holding the element count of a wrapped collection.
pub const TOTAL: &str = "total";
