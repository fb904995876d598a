//! Common API models and constants
//!
//! This module defines the pagination envelope shared by all list endpoints,
//! the paging query parameters, and the Content-Case negotiation convention.

use serde::{Deserialize, Serialize};

// Case negotiation
pub const CONTENT_CASE_HEADER: &str = "Content-Case";
pub const CASE_QUERY_PARAM: &str = "_case";
pub const JSON_SNAKE: &str = "json/snake";
pub const JSON_CAMEL: &str = "json/camel";

// Token authentication
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TOKEN_PREFIX: &str = "Token ";
pub const ACCESS_TOKEN: &str = "accessToken";
pub const TOKEN_KEY_LENGTH: usize = 40;

// Pagination
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "page_size";
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

// Route prefix, e.g. /api/v1
pub const API_ROUTE: &str = "/api";
pub const API_VERSIONS: &[&str] = &["v1"];

/// Generic pagination wrapper for API responses
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 1,
            pages_available: 0,
            page_items: vec![],
        }
    }
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            pages_available: if page_size > 0 {
                total_count.div_ceil(page_size)
            } else {
                0
            },
            page_items,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Map page items while keeping the envelope
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            page_number: self.page_number,
            pages_available: self.pages_available,
            page_items: self.page_items.into_iter().map(f).collect(),
        }
    }
}

/// Paging parameters parsed from the query string
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    /// Page number, 1-based
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to the maximum
    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the current page
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.page_size()
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: None,
            page_size: None,
        }
    }
}

/// Negotiated JSON key casing for a request/response pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentCase {
    /// Server-canonical snake_case
    #[default]
    Snake,
    /// Client-facing camelCase
    Camel,
}

impl ContentCase {
    /// Parse the `Content-Case` header value; unknown values fall back to
    /// snake_case.
    pub fn from_header_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            JSON_CAMEL => ContentCase::Camel,
            _ => ContentCase::Snake,
        }
    }

    /// Parse the `_case` query parameter value
    pub fn from_query_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "camel" => ContentCase::Camel,
            _ => ContentCase::Snake,
        }
    }

    pub fn is_camel(&self) -> bool {
        matches!(self, ContentCase::Camel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        let page: Page<String> = Page::default();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.page_number, 1);
        assert!(page.page_items.is_empty());
    }

    #[test]
    fn test_page_new() {
        let items = vec!["a".to_string(), "b".to_string()];
        let page = Page::new(10, 1, 5, items);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.pages_available, 2);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(1, 1, 20, vec![1]);
        let value = serde_json::to_value(&page).expect("serialize");
        assert!(value.get("totalCount").is_some());
        assert!(value.get("pageItems").is_some());
    }

    #[test]
    fn test_page_query_defaults_and_clamping() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);

        let query = PageQuery {
            page: Some(3),
            page_size: Some(1000),
        };
        assert_eq!(query.page_size(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 2 * MAX_PAGE_SIZE);

        let query = PageQuery {
            page: Some(0),
            page_size: Some(0),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 1);
    }

    #[test]
    fn test_content_case_negotiation() {
        assert_eq!(ContentCase::from_header_value("json/camel"), ContentCase::Camel);
        assert_eq!(ContentCase::from_header_value(" JSON/Camel "), ContentCase::Camel);
        assert_eq!(ContentCase::from_header_value("json/snake"), ContentCase::Snake);
        assert_eq!(ContentCase::from_header_value("bogus"), ContentCase::Snake);
        assert_eq!(ContentCase::from_query_value("camel"), ContentCase::Camel);
        assert_eq!(ContentCase::from_query_value("snake"), ContentCase::Snake);
        assert_eq!(ContentCase::default(), ContentCase::Snake);
    }
}
