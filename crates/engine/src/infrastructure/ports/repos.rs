//! Repository port traits for database access.

use async_trait::async_trait;
use locatr_domain::{Location, LocationCode, LocationId};

use super::error::RepoError;
use super::types::{LocationChanges, LocationFilter, NewLocation, Page, PageRequest};

// =============================================================================
// Location Storage
// =============================================================================

/// Data access for locations. No validation happens behind this trait; callers
/// hand in already-validated values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepo: Send + Sync {
    // Queries

    /// Every location, newest first.
    async fn list_all(&self) -> Result<Vec<Location>, RepoError>;

    /// One page of locations matching `filter`, newest first.
    async fn list_page(
        &self,
        filter: &LocationFilter,
        page: PageRequest,
    ) -> Result<Page<Location>, RepoError>;

    async fn get(&self, id: LocationId) -> Result<Option<Location>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// True when no location other than `exclude` uses `code`.
    async fn is_code_unique(
        &self,
        code: &LocationCode,
        exclude: Option<LocationId>,
    ) -> Result<bool, RepoError>;

    // CRUD

    /// Fails with `RepoError::DuplicateCode` when the code is taken.
    async fn create(&self, location: &NewLocation) -> Result<Location, RepoError>;

    /// Applies `changes` and refreshes `updated_at`.
    ///
    /// Fails with `RepoError::DuplicateCode` when the new code belongs to
    /// another location, `RepoError::NotFound` when the row is gone.
    async fn update(
        &self,
        id: LocationId,
        changes: &LocationChanges,
    ) -> Result<Location, RepoError>;

    /// Fails with `RepoError::NotFound` when the row is already gone.
    async fn delete(&self, id: LocationId) -> Result<(), RepoError>;
}
