//! Helper types for port operations.

use locatr_domain::{ImageUrl, LocationCode, LocationName};
use locatr_shared::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

// =============================================================================
// Queries
// =============================================================================

/// Optional substring filters for list queries, combined with AND.
///
/// Blank values are dropped on construction so "no filter" has exactly one
/// representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    name: Option<String>,
    code: Option<String>,
}

impl LocationFilter {
    pub fn new(name: Option<String>, code: Option<String>) -> Self {
        Self {
            name: non_blank(name),
            code: non_blank(code),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A 1-indexed page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Page numbers below 1 become 1; page sizes are clamped to `1..=MAX_PER_PAGE`.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the size of the whole matching set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Number of pages needed for `total`; never less than 1.
    pub fn total_pages(&self) -> u32 {
        let per_page = u64::from(self.request.per_page());
        let pages = self.total.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_prev(&self) -> bool {
        self.request.page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.request.page() < self.total_pages()
    }
}

// =============================================================================
// Writes
// =============================================================================

/// A validated location that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub code: LocationCode,
    pub name: LocationName,
    pub image: Option<ImageUrl>,
}

/// Validated partial changes; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationChanges {
    pub code: Option<LocationCode>,
    pub name: Option<LocationName>,
    /// `Some(None)` clears the image.
    pub image: Option<Option<ImageUrl>>,
}
