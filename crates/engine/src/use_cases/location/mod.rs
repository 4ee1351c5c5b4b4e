//! Location CRUD operations.
//!
//! Every write runs in two stages: sanitize the raw payload, then build the
//! domain value objects from the sanitized text. Only fully valid input
//! reaches the repository.

pub mod sanitize;

use std::sync::Arc;

use locatr_domain::{ImageUrl, Location, LocationCode, LocationId, LocationName};
use locatr_shared::{LocationPayload, DEFAULT_PER_PAGE, MAX_PER_PAGE};

use crate::infrastructure::ports::{
    LocationChanges, LocationFilter, LocationRepo, NewLocation, Page, PageRequest, RepoError,
};
use crate::use_cases::validation::FieldErrors;

use sanitize::{sanitize_image, sanitize_text};

/// Message attached to the `code` field when another location already uses it.
pub const DUPLICATE_CODE_MESSAGE: &str = "The code has already been taken.";

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location not found")]
    NotFound,
    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),
    #[error("Duplicate location code: {0}")]
    DuplicateCode(String),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl From<RepoError> for LocationError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound,
            RepoError::DuplicateCode(code) => Self::DuplicateCode(code),
            other => Self::Repo(other),
        }
    }
}

impl From<FieldErrors> for LocationError {
    fn from(errors: FieldErrors) -> Self {
        Self::Invalid(errors)
    }
}

pub struct LocationService {
    repo: Arc<dyn LocationRepo>,
}

impl LocationService {
    pub fn new(repo: Arc<dyn LocationRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_all_locations(&self) -> Result<Vec<Location>, LocationError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn get_paginated_locations(
        &self,
        filter: &LocationFilter,
        page: PageRequest,
    ) -> Result<Page<Location>, LocationError> {
        Ok(self.repo.list_page(filter, page).await?)
    }

    pub async fn find_location(&self, id: LocationId) -> Result<Option<Location>, LocationError> {
        Ok(self.repo.get(id).await?)
    }

    pub async fn is_code_unique(
        &self,
        code: &LocationCode,
        exclude: Option<LocationId>,
    ) -> Result<bool, LocationError> {
        Ok(self.repo.is_code_unique(code, exclude).await?)
    }

    /// Sanitize, validate and store a new location.
    ///
    /// `code` and `name` are required; a missing or blank `image` stores no
    /// image.
    pub async fn create_location(&self, payload: LocationPayload) -> Result<Location, LocationError> {
        let mut errors = FieldErrors::new();

        let code = errors.check("code", LocationCode::new(required(payload.code)));
        let name = errors.check("name", LocationName::new(required(payload.name)));
        let image = validate_image(&mut errors, payload.image.flatten());

        let (Some(code), Some(name), Some(image)) = (code, name, image) else {
            return Err(LocationError::Invalid(errors));
        };

        self.ensure_code_available(&code, None).await?;

        let location = self.repo.create(&NewLocation { code, name, image }).await?;
        tracing::info!(id = %location.id(), code = %location.code(), "Location created");
        Ok(location)
    }

    /// Apply the fields present in `payload` to `location`.
    ///
    /// Absent fields are left alone; an explicit `null` image clears it.
    pub async fn update_location(
        &self,
        location: &Location,
        payload: LocationPayload,
    ) -> Result<Location, LocationError> {
        let mut errors = FieldErrors::new();
        let mut changes = LocationChanges::default();

        if let Some(code) = payload.code {
            changes.code = errors.check("code", LocationCode::new(sanitize_text(&code)));
        }
        if let Some(name) = payload.name {
            changes.name = errors.check("name", LocationName::new(sanitize_text(&name)));
        }
        if let Some(image) = payload.image {
            changes.image = validate_image(&mut errors, image);
        }

        let changes = errors.into_result(changes)?;

        if let Some(code) = &changes.code {
            if code != location.code() {
                self.ensure_code_available(code, Some(location.id())).await?;
            }
        }

        let updated = self.repo.update(location.id(), &changes).await?;
        tracing::info!(id = %updated.id(), "Location updated");
        Ok(updated)
    }

    pub async fn delete_location(&self, location: &Location) -> Result<(), LocationError> {
        self.repo.delete(location.id()).await?;
        tracing::info!(id = %location.id(), "Location deleted");
        Ok(())
    }

    /// Turn raw `page` / `per_page` query values into a page window.
    ///
    /// Pages below 1 mean the first page; a page size outside
    /// `1..=MAX_PER_PAGE` is a field error.
    pub fn page_request(
        &self,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<PageRequest, FieldErrors> {
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let per_page = per_page.unwrap_or(i64::from(DEFAULT_PER_PAGE));

        if !(1..=i64::from(MAX_PER_PAGE)).contains(&per_page) {
            return Err(FieldErrors::single(
                "per_page",
                format!("The per page must be between 1 and {MAX_PER_PAGE}."),
            ));
        }

        Ok(PageRequest::new(
            u32::try_from(page).unwrap_or(u32::MAX),
            u32::try_from(per_page).unwrap_or(DEFAULT_PER_PAGE),
        ))
    }

    /// Friendlier early failure; the store's unique constraint still decides.
    async fn ensure_code_available(
        &self,
        code: &LocationCode,
        exclude: Option<LocationId>,
    ) -> Result<(), LocationError> {
        if self.repo.is_code_unique(code, exclude).await? {
            Ok(())
        } else {
            Err(LocationError::DuplicateCode(code.to_string()))
        }
    }
}

fn required(value: Option<String>) -> String {
    value.as_deref().map(sanitize_text).unwrap_or_default()
}

/// `Some(None)` for no image, `None` when the value was rejected.
fn validate_image(errors: &mut FieldErrors, raw: Option<String>) -> Option<Option<ImageUrl>> {
    match raw.as_deref().and_then(sanitize_image) {
        None => Some(None),
        Some(url) => errors.check("image", ImageUrl::new(url)).map(Some),
    }
}
