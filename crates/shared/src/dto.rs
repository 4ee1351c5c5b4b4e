//! Location wire representation.

use chrono::{DateTime, Utc};
use locatr_domain::Location;
use serde::{Deserialize, Serialize};

/// A location as it appears in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Always serialized; `null` when the location has no image.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Location> for LocationData {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id().as_i64(),
            code: location.code().to_string(),
            name: location.name().to_string(),
            image: location.image().map(|url| url.to_string()),
            created_at: location.created_at(),
            updated_at: location.updated_at(),
        }
    }
}

impl From<Location> for LocationData {
    fn from(location: Location) -> Self {
        Self::from(&location)
    }
}
