//! Image URL value object.
//!
//! Accepts absolute `http`/`https` URLs only and keeps them in the form the
//! `url` crate serializes them to, so the stored value is stable under
//! re-validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::DomainError;

/// Maximum length for a stored image URL
pub const MAX_IMAGE_URL_LENGTH: usize = 500;

/// A validated, normalized image URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Parse and normalize an image URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The value is not an absolute URL
    /// - The scheme is not `http` or `https`
    /// - The normalized URL exceeds 500 characters
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref().trim();
        let parsed = Url::parse(raw)
            .map_err(|_| DomainError::validation("The image must be a valid URL."))?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(DomainError::validation(
                "The image must be an http or https URL.",
            ));
        }

        let normalized = String::from(parsed);
        if normalized.chars().count() > MAX_IMAGE_URL_LENGTH {
            return Err(DomainError::validation(format!(
                "The image may not be greater than {} characters.",
                MAX_IMAGE_URL_LENGTH
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ImageUrl> for String {
    fn from(url: ImageUrl) -> String {
        url.0
    }
}
