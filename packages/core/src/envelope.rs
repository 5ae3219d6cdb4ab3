//! Response envelopes returned by the admin API.

use serde::{Deserialize, Serialize};

use crate::list_query::DEFAULT_LIMIT;

/// Structured error returned instead of failing the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error} (status {status})")]
pub struct ApiError {
    /// Human-readable message, suitable for a toast.
    pub error: String,
    /// HTTP-style status code.
    pub status: u16,
}

impl ApiError {
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }

    /// 400: the request failed validation.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(error, 400)
    }

    /// 404: the referenced record does not exist.
    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(error, 404)
    }

    /// 409: the request conflicts with existing data.
    pub fn conflict(error: impl Into<String>) -> Self {
        Self::new(error, 409)
    }

    /// 500: the backing store failed.
    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(error, 500)
    }

    pub fn is_validation(&self) -> bool {
        self.status == 400
    }
}

/// Result of a single admin API call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Pagination metadata for a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageMeta {
    /// Compute metadata for `total_items` split into pages of `per_page`.
    pub fn new(current_page: usize, per_page: usize, total_items: usize) -> Self {
        let per_page = per_page.max(1);
        let current_page = current_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        Self {
            current_page,
            per_page,
            total_items,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }
}

impl Default for PageMeta {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT, 0)
    }
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// An empty page, used when a list cannot be produced.
    pub fn empty(page: usize, limit: usize) -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::new(page, limit, 0),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::empty(1, DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_meta_flags() {
        let meta = PageMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);

        let last = PageMeta::new(3, 10, 25);
        assert!(!last.has_next_page);

        let empty = PageMeta::new(0, 0, 0);
        assert_eq!(empty.current_page, 1);
        assert_eq!(empty.per_page, 1);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page && !empty.has_prev_page);
    }

    #[test]
    fn empty_page_keeps_requested_position() {
        let page: Paginated<u8> = Paginated::empty(4, 25);
        assert!(page.items.is_empty());
        assert_eq!(page.meta.current_page, 4);
        assert_eq!(page.meta.per_page, 25);
        assert!(page.meta.has_prev_page);
    }

    #[test]
    fn error_statuses() {
        assert_eq!(ApiError::bad_request("x").status, 400);
        assert!(ApiError::bad_request("x").is_validation());
        assert_eq!(ApiError::conflict("x").status, 409);
        assert_eq!(ApiError::internal("disk full").to_string(), "disk full (status 500)");
    }
}
