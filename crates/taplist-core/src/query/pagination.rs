//! Paginated results
//!
//! A bounded page of items plus the navigation metadata callers serialize
//! into the `X-Pagination` response header.

use serde::{Deserialize, Serialize};

/// Response header conventionally carrying [`PageMetadata`] as JSON.
pub const PAGINATION_HEADER: &str = "X-Pagination";

/// A bounded result page with derived navigation metadata
///
/// Metadata is computed once at construction and is internally consistent
/// by definition; there are no setters.
#[derive(Debug, Clone)]
pub struct PaginatedList<T> {
    items: Vec<T>,
    page_number: i64,
    total_pages: i64,
    total_count: i64,
}

impl<T> PaginatedList<T> {
    /// Materialize one page from a lazy sequence.
    ///
    /// Counts the full sequence while retaining only the requested window,
    /// in a single pass. A page beyond the last yields empty `items` with
    /// intact totals; out-of-range pages are a normal boundary case, not an
    /// error.
    pub fn from_iter<I>(source: I, page_number: i64, page_size: i64) -> Self
    where
        I: Iterator<Item = T>,
    {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let skip = (page_number - 1) * page_size;

        let mut total_count: i64 = 0;
        let mut items = Vec::new();

        for item in source {
            if total_count >= skip && (items.len() as i64) < page_size {
                items.push(item);
            }
            total_count += 1;
        }

        let total_pages = if total_count == 0 {
            0
        } else {
            ((total_count as f64) / (page_size as f64)).ceil() as i64
        };

        Self {
            items,
            page_number,
            total_pages,
            total_count,
        }
    }

    /// The current page of items, in sequence order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The 1-indexed page this window covers.
    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    /// Number of elements in the whole filtered sequence, not just this
    /// page.
    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// The navigation metadata for this page.
    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            current_page: self.page_number,
            total_pages: self.total_pages,
            total_count: self.total_count,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }

    /// Map the items to another type, carrying the metadata over unchanged.
    pub fn map<U, F>(self, f: F) -> PaginatedList<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedList {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// Navigation metadata serialized into the [`PAGINATION_HEADER`] response
/// header
///
/// Field names follow the established wire contract and must not change
/// casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageMetadata {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageMetadata {
    /// Serialize to the JSON form carried by the header.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
