//! Offset pagination primitives shared by the voter registry endpoints.
//!
//! The crate owns two concerns:
//!
//! - [`PageRequest`]: a validated `(page, limit)` pair. Inbound adapters build
//!   it leniently from query strings via [`PageQuery`], so absent or
//!   unparsable values fall back to page `1` and limit `10` instead of
//!   failing the request.
//! - [`Paginated`]: the envelope returned to callers, carrying the page items
//!   together with the total page count computed as `ceil(total / limit)`.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageQuery, PageRequest, Paginated};
//!
//! let request = PageQuery::new(Some("2"), Some("3")).into_request();
//! assert_eq!(request.offset(), 3);
//!
//! let page = Paginated::new(vec!["d", "e", "f"], 7, request);
//! assert_eq!(page.total_pages(), 3);
//! ```

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Page number used when the caller does not supply a usable value.
pub const DEFAULT_PAGE: NonZeroU64 = NonZeroU64::MIN;

/// Page size used when the caller does not supply a usable value.
pub const DEFAULT_LIMIT: NonZeroU64 = match NonZeroU64::new(10) {
    Some(value) => value,
    None => NonZeroU64::MIN,
};

/// Errors raised by the strict [`PageRequest::new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// Validated one-based page request.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: NonZeroU64,
    limit: NonZeroU64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Construct a request, rejecting zero values.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` or `limit` is zero.
    pub const fn new(page: u64, limit: u64) -> Result<Self, PageRequestError> {
        let Some(page) = NonZeroU64::new(page) else {
            return Err(PageRequestError::ZeroPage);
        };
        let Some(limit) = NonZeroU64::new(limit) else {
            return Err(PageRequestError::ZeroLimit);
        };
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page.get()
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit.get()
    }

    /// Number of items to skip before the page starts: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.get() - 1).saturating_mul(self.limit.get())
    }

    /// Total number of pages needed to hold `total_items` at this limit.
    #[must_use]
    pub const fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.limit.get())
    }
}

/// Raw `?page=&limit=` query values as received from a client.
///
/// Values stay as strings so that malformed input coerces to defaults rather
/// than failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Requested page, if supplied.
    #[serde(default)]
    pub page: Option<String>,
    /// Requested page size, if supplied.
    #[serde(default)]
    pub limit: Option<String>,
}

impl PageQuery {
    /// Build a query from optional raw values.
    #[must_use]
    pub fn new(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    /// Resolve into a [`PageRequest`], substituting defaults for absent,
    /// non-numeric, or zero values.
    #[must_use]
    pub fn into_request(self) -> PageRequest {
        PageRequest {
            page: lenient(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: lenient(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

fn lenient(raw: Option<&str>) -> Option<NonZeroU64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .and_then(NonZeroU64::new)
}

/// A single page of results plus the page count for the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    items: Vec<T>,
    total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap `items` drawn from a collection of `total_items` entries.
    #[must_use]
    pub const fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_pages: request.total_pages(total_items),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// `ceil(total_items / limit)`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Consume the envelope, returning the page items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page arithmetic and lenient parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some("3"), Some("25"), 3, 25)]
    #[case(Some("abc"), Some("5"), 1, 5)]
    #[case(Some("0"), Some("0"), 1, 10)]
    #[case(Some("-2"), Some("x"), 1, 10)]
    #[case(Some(" 4 "), None, 4, 10)]
    fn lenient_query_falls_back_to_defaults(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        let request = PageQuery::new(page, limit).into_request();
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(0, 5, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::ZeroLimit)]
    fn strict_constructor_rejects_zero(
        #[case] page: u64,
        #[case] limit: u64,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(4, 3, 9)]
    fn offset_skips_previous_pages(#[case] page: u64, #[case] limit: u64, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(7, 3, 3)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] limit: u64, #[case] pages: u64) {
        let request = PageRequest::new(1, limit).expect("valid request");
        assert_eq!(request.total_pages(total), pages);
    }

    #[rstest]
    fn envelope_serialises_camel_case() {
        let page = Paginated::new(vec![1_u8, 2], 5, PageRequest::default());
        let value = serde_json::to_value(&page).expect("serialise");
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["items"], serde_json::json!([1, 2]));
    }

    #[rstest]
    fn empty_page_beyond_the_end_keeps_the_page_count() {
        let request = PageRequest::new(u64::MAX, u64::MAX).expect("valid");
        let page = Paginated::<u8>::new(Vec::new(), 12, request);
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 1);
        assert!(page.into_items().is_empty());
    }
}
