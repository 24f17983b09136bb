//! Pagination container for paged collections.

use serde::Serialize;

/// A `{href}` link value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Href {
    pub href: String,
}

/// Navigation links of a page. Unset links are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Href>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<Href>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Href>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Href>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Href>,
}

fn href(url: impl Into<String>) -> Option<Href> {
    let href = url.into();
    (!href.is_empty()).then_some(Href { href })
}

/// One page of a collection.
///
/// Its `_embedded` list is linked in place rather than nested under another
/// `_embedded` map, so a page renders as `{count, total, _embedded: [...],
/// _links}`.
///
/// ```
/// use helios_hal::HalPagination;
///
/// let page = HalPagination::new(vec!["a", "b"])
///     .with_total(10)
///     .with_self("/items?page=1")
///     .with_next("/items?page=2");
/// assert_eq!(page.count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "HalPagination")]
pub struct HalPagination<T> {
    count: usize,
    total: usize,
    #[serde(rename = "_embedded")]
    embedded: Vec<T>,
    #[serde(rename = "_links")]
    links: PaginationLinks,
}

impl<T> HalPagination<T> {
    /// A page holding `embedded`. Count and total default to its length.
    pub fn new(embedded: Vec<T>) -> Self {
        Self {
            count: embedded.len(),
            total: embedded.len(),
            embedded,
            links: PaginationLinks::default(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// Empty URLs clear the link.
    pub fn with_self(mut self, url: impl Into<String>) -> Self {
        self.links.self_link = href(url);
        self
    }

    pub fn with_first(mut self, url: impl Into<String>) -> Self {
        self.links.first = href(url);
        self
    }

    pub fn with_prev(mut self, url: impl Into<String>) -> Self {
        self.links.prev = href(url);
        self
    }

    pub fn with_next(mut self, url: impl Into<String>) -> Self {
        self.links.next = href(url);
        self
    }

    pub fn with_last(mut self, url: impl Into<String>) -> Self {
        self.links.last = href(url);
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn embedded(&self) -> &[T] {
        &self.embedded
    }

    pub fn links(&self) -> &PaginationLinks {
        &self.links
    }
}
