//! Pagination envelope shared by the list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size used by the list screens.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of a paginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    /// The pagination metadata without the items.
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            size: self.size,
            total: self.total,
            pages: self.pages,
        }
    }
}

/// Pagination metadata mirrored by the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            total: 0,
            pages: 0,
        }
    }
}

/// Query parameters accepted by the paginated list endpoints.
///
/// Unset fields are left out of the query string. Resource-specific filters
/// go in `filters` as plain key/value pairs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub filters: std::collections::BTreeMap<String, String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add a resource-specific filter such as `case_status=in_progress`.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Fill in page and size from the store's pagination unless already set.
    pub(crate) fn with_defaults(mut self, pagination: &Pagination) -> Self {
        self.page.get_or_insert(pagination.page);
        self.size.get_or_insert(pagination.size);
        self
    }
}
