//! Page/limit pagination over in-memory lists.
//!
//! Every list endpoint loads its joined rows and hands them to [`paginate`],
//! which slices one page out and reports where that page sits in the whole
//! list.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "currentPage": 2,
//!   "totalPages": 3,
//!   "limit": 15,
//!   "startIndex": 15,
//!   "endIndex": 30,
//!   "totalItems": 40,
//!   "currentItems": [...]
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_optional_i64;

/// Page size used when the client sends no `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 15;

/// `?page=&limit=` query parameters.
///
/// Both are optional and empty strings count as absent. Values below 1 are
/// raised to 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, 1-indexed (default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (default: 15)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1) as usize
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT as i64).max(1) as usize
    }
}

/// One page of a list plus its position in the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Requested page, capped at `total_pages` (0 for an empty list)
    pub current_page: usize,
    pub total_pages: usize,
    pub limit: usize,
    pub start_index: usize,
    /// Exclusive end of the requested window, not capped at `total_items`
    pub end_index: usize,
    pub total_items: usize,
    pub current_items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            current_page: self.current_page,
            total_pages: self.total_pages,
            limit: self.limit,
            start_index: self.start_index,
            end_index: self.end_index,
            total_items: self.total_items,
            current_items: self.current_items.into_iter().map(f).collect(),
        }
    }
}

/// Slices `items` into the requested page.
///
/// `page` and `limit` below 1 are treated as 1. A page past the end yields
/// an empty `current_items` while the indices still describe the requested
/// window.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let page = page.max(1);
    let limit = limit.max(1);

    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit);
    let start_index = (page - 1).saturating_mul(limit);
    let end_index = page.saturating_mul(limit);

    let current_items: Vec<T> = items.into_iter().skip(start_index).take(limit).collect();

    Page {
        current_page: page.min(total_pages),
        total_pages,
        limit,
        start_index,
        end_index,
        total_items,
        current_items,
    }
}

/// Shorthand for [`paginate`] driven by query parameters.
pub fn paginate_with<T>(items: Vec<T>, params: &PaginationParams) -> Page<T> {
    paginate(items, params.page(), params.limit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 15);
    }

    #[test]
    fn test_params_clamp_to_one() {
        let params = PaginationParams {
            page: Some(-3),
            limit: Some(0),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_first_page() {
        let page = paginate((1..=40).collect(), 1, 15);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 15);
        assert_eq!(page.total_items, 40);
        assert_eq!(page.current_items, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate((1..=40).collect(), 3, 15);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.start_index, 30);
        assert_eq!(page.end_index, 45);
        assert_eq!(page.current_items, (31..=40).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_past_the_end() {
        let page = paginate(vec!["a", "b", "c"], 5, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.start_index, 8);
        assert_eq!(page.end_index, 10);
        assert!(page.current_items.is_empty());
    }

    #[test]
    fn test_empty_list() {
        let page = paginate(Vec::<u8>::new(), 1, 15);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 0);
        assert!(page.current_items.is_empty());
    }

    #[test]
    fn test_exact_multiple_of_limit() {
        let page = paginate((0..30).collect::<Vec<i32>>(), 2, 15);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_items.len(), 15);
        assert_eq!(page.current_items[0], 15);
    }

    #[test]
    fn test_zero_inputs_are_raised() {
        let page = paginate(vec![1, 2, 3], 0, 0);
        assert_eq!(page.limit, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.current_items, vec![1]);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = paginate(vec![1, 2, 3, 4], 2, 3).map(|n| n * 10);
        assert_eq!(page.current_items, vec![40]);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.start_index, 3);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(paginate(vec![1], 1, 15)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["currentItems"][0], 1);
        assert!(json.get("current_page").is_none());
    }

    #[test]
    fn test_query_params_deserialize_empty_strings() {
        let params: PaginationParams =
            serde_json::from_value(serde_json::json!({ "page": "", "limit": "20" })).unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.limit(), 20);
    }
}
