//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}

impl DomainError {
    /// Creates a validation error for a value that breaks a field invariant.
    ///
    /// Use this when a value object rejects its input:
    /// - Required fields are empty
    /// - Values exceed their length limit
    /// - Values have the wrong shape (e.g. not a URL)
    ///
    /// # Example
    /// ```ignore
    /// if code.is_empty() {
    ///     return Err(DomainError::validation("The code field is required."));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// The human-readable message without the variant prefix.
    ///
    /// Field-level error maps show this text next to the field name, so the
    /// "Validation failed:" prefix from `Display` would only be noise there.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::InvalidId(msg) => msg.clone(),
        }
    }
}
