//! Location entity - a named, coded place with an optional image.
//!
//! Locations are only ever built from validated parts: the store assigns the
//! id and timestamps, the value objects guarantee the field invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::LocationId;
use crate::value_objects::{ImageUrl, LocationCode, LocationName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    code: LocationCode,
    name: LocationName,
    image: Option<ImageUrl>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Location {
    /// Reconstruct a location from storage.
    pub fn from_parts(
        id: LocationId,
        code: LocationCode,
        name: LocationName,
        image: Option<ImageUrl>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            name,
            image,
            created_at,
            updated_at,
        }
    }

    // Read accessors

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn code(&self) -> &LocationCode {
        &self.code
    }

    pub fn name(&self) -> &LocationName {
        &self.name
    }

    pub fn image(&self) -> Option<&ImageUrl> {
        self.image.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
