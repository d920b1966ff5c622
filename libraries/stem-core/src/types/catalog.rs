/// Catalog request model
///
/// Every playable list in the client (explore tracks, library, trending
/// samples, ...) is fetched with the same (search, sort, page) triple.
use serde::{Deserialize, Serialize};

/// Pagination window for a catalog fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Zero-based page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,
}

impl CatalogPage {
    /// First page with the given size
    pub fn first(per_page: u32) -> Self {
        Self { page: 0, per_page }
    }

    /// Item offset of this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.per_page)
    }
}

impl Default for CatalogPage {
    fn default() -> Self {
        Self::first(20)
    }
}

/// Sortable catalog fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Newest first by default
    #[default]
    CreatedAt,
    Title,
    ArtistName,
    PlayCount,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// A complete catalog list request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text search filter
    pub search: Option<String>,

    /// Sort field
    pub sort: SortField,

    /// Sort direction
    pub order: SortOrder,

    /// Pagination window
    pub page: CatalogPage,
}

impl CatalogQuery {
    /// Create a default query (newest first, first page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search filter
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set the sort field and direction
    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = field;
        self.order = order;
        self
    }

    /// Set the pagination window
    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = CatalogPage { page, per_page };
        self
    }
}
