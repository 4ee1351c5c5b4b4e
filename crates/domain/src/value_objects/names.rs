//! Validated text newtypes for the Location entity
//!
//! These newtypes ensure that values are valid by construction:
//! - Non-empty after trimming
//! - Within length limits (counted in characters, not bytes)
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a location code
pub const MAX_CODE_LENGTH: usize = 50;

/// Maximum length for a location name
pub const MAX_NAME_LENGTH: usize = 255;

fn trimmed_within(value: &str, field: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!(
            "The {field} field is required."
        )));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(format!(
            "The {field} may not be greater than {max} characters."
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// LocationCode
// ============================================================================

/// A validated location code (non-empty, <=50 chars, trimmed).
///
/// Equality is case-sensitive; uniqueness across locations is the store's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationCode(String);

impl LocationCode {
    /// Create a new validated location code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The code is empty after trimming
    /// - The code exceeds 50 characters after trimming
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        trimmed_within(&code.into(), "code", MAX_CODE_LENGTH).map(Self)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LocationCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LocationCode> for String {
    fn from(code: LocationCode) -> String {
        code.0
    }
}

// ============================================================================
// LocationName
// ============================================================================

/// A validated location name (non-empty, <=255 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationName(String);

impl LocationName {
    /// Create a new validated location name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 255 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        trimmed_within(&name.into(), "name", MAX_NAME_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LocationName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LocationName> for String {
    fn from(name: LocationName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_trimmed() {
        let code = LocationCode::new("  EIFFEL ").unwrap();
        assert_eq!(code.as_str(), "EIFFEL");
    }

    #[test]
    fn code_rejects_blank() {
        let err = LocationCode::new("   ").unwrap_err();
        assert_eq!(err.message(), "The code field is required.");
    }

    #[test]
    fn code_length_counts_characters() {
        // 50 two-byte characters is still within the limit.
        let code = "é".repeat(MAX_CODE_LENGTH);
        assert!(LocationCode::new(code).is_ok());

        let err = LocationCode::new("A".repeat(MAX_CODE_LENGTH + 1)).unwrap_err();
        assert_eq!(err.message(), "The code may not be greater than 50 characters.");
    }

    #[test]
    fn code_equality_is_case_sensitive() {
        assert_ne!(
            LocationCode::new("abc").unwrap(),
            LocationCode::new("ABC").unwrap()
        );
    }

    #[test]
    fn name_limits() {
        assert!(LocationName::new("N".repeat(MAX_NAME_LENGTH)).is_ok());
        let err = LocationName::new("N".repeat(MAX_NAME_LENGTH + 1)).unwrap_err();
        assert_eq!(err.message(), "The name may not be greater than 255 characters.");
    }

    #[test]
    fn name_deserialization_validates() {
        let ok: LocationName = serde_json::from_str("\"Torre Eiffel\"").unwrap();
        assert_eq!(ok.as_str(), "Torre Eiffel");
        assert!(serde_json::from_str::<LocationName>("\"  \"").is_err());
    }
}
