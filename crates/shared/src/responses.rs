//! Response envelopes returned by the HTTP API.
//!
//! Every success body carries `success` and a human-readable `message`;
//! failures use [`ErrorResponse`] except for the two framework-level cases,
//! authentication ([`UnauthorizedResponse`]) and not-found
//! ([`MessageResponse`] with `success: false`).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Success envelopes
// =============================================================================

/// Single-item success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Paginated list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

/// Window description of a paginated result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of matching records across all pages.
    pub total: u64,
    /// Number of records on this page.
    pub count: u32,
    pub per_page: u32,
    pub current_page: u32,
    /// Always at least 1, even for an empty result set.
    pub total_pages: u32,
}

/// Navigation links for a paginated result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Body-less success (delete) and framework-level not-found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// `GET /v1/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// `POST /v1/auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub authenticated: bool,
}

// =============================================================================
// Error envelopes
// =============================================================================

/// Error classification codes carried in [`ErrorBody::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Client Errors (422) ===
    /// A field is missing or malformed
    #[serde(rename = "E_INVALID_PARAM")]
    InvalidParam,
    /// The code is already used by another location
    #[serde(rename = "E_DUPLICATE_CODE")]
    DuplicateCode,

    // === Server Errors (500) ===
    #[serde(rename = "E_RETRIEVAL_ERROR")]
    RetrievalError,
    #[serde(rename = "E_CREATION_ERROR")]
    CreationError,
    #[serde(rename = "E_UPDATE_ERROR")]
    UpdateError,
    #[serde(rename = "E_DELETION_ERROR")]
    DeletionError,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    /// Wire name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParam => "E_INVALID_PARAM",
            Self::DuplicateCode => "E_DUPLICATE_CODE",
            Self::RetrievalError => "E_RETRIEVAL_ERROR",
            Self::CreationError => "E_CREATION_ERROR",
            Self::UpdateError => "E_UPDATE_ERROR",
            Self::DeletionError => "E_DELETION_ERROR",
            Self::Unknown => "E_UNKNOWN",
        }
    }

    /// Whether the code describes a problem with the request itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParam | Self::DuplicateCode)
    }
}

// NOTE: no ErrorCode -> HTTP status mapping here; status codes are the
// engine's concern.

/// Structured 422/500 error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: ErrorCode,
    /// Field errors (`{field: [messages]}`) for 422, error text for 500 in
    /// debug mode, absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                message: message.into(),
                code,
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }
}

impl ErrorBody {
    /// Field-level messages, if `details` holds a field error map.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.details
            .as_ref()
            .and_then(|details| serde_json::from_value(details.clone()).ok())
            .unwrap_or_default()
    }
}

/// 401 body produced by the API key check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnauthorizedResponse {
    pub error: String,
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            error: "Unauthorized".to_string(),
            message: "Invalid or missing API key".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_codes_use_wire_names() {
        assert_eq!(
            serde_json::to_value(ErrorCode::DuplicateCode).unwrap(),
            json!("E_DUPLICATE_CODE")
        );
        let parsed: ErrorCode = serde_json::from_value(json!("E_SOMETHING_NEW")).unwrap();
        assert_eq!(parsed, ErrorCode::Unknown);
        assert_eq!(ErrorCode::UpdateError.as_str(), "E_UPDATE_ERROR");
    }

    #[test]
    fn field_errors_parse_details_map() {
        let response = ErrorResponse::new(ErrorCode::InvalidParam, "Validation failed")
            .with_details(json!({ "code": ["The code field is required."] }));

        let fields = response.error.field_errors();
        assert_eq!(fields["code"], vec!["The code field is required.".to_string()]);
    }

    #[test]
    fn field_errors_empty_for_text_details() {
        let response = ErrorResponse::new(ErrorCode::RetrievalError, "Error retrieving locations")
            .with_details(json!("disk I/O error"));
        assert!(response.error.field_errors().is_empty());
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new(
            ErrorCode::CreationError,
            "Error creating location",
        ))
        .unwrap();
        assert_eq!(
            json,
            json!({
                "success": false,
                "error": { "message": "Error creating location", "code": "E_CREATION_ERROR" }
            })
        );
    }
}
