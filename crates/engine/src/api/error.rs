//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use locatr_shared::{ErrorCode, ErrorResponse, MessageResponse};
use serde_json::json;

use crate::use_cases::location::DUPLICATE_CODE_MESSAGE;
use crate::use_cases::{FieldErrors, LocationError};

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const LOCATION_NOT_FOUND: &str = "Location not found";

#[derive(Debug)]
pub enum ApiError {
    /// 404 with a plain message body.
    NotFound(String),
    /// 422 `E_INVALID_PARAM` with per-field messages.
    Invalid(FieldErrors),
    /// 422 `E_DUPLICATE_CODE`.
    DuplicateCode,
    /// 500 with the operation's error code; `details` only in debug mode.
    Internal {
        code: ErrorCode,
        message: &'static str,
        details: Option<String>,
    },
}

impl ApiError {
    /// Map a use case failure for the operation identified by `code`.
    ///
    /// Internal failures are logged here, before their text is hidden from
    /// the client.
    pub fn from_location(
        err: LocationError,
        code: ErrorCode,
        message: &'static str,
        debug: bool,
    ) -> Self {
        match err {
            LocationError::NotFound => Self::NotFound(LOCATION_NOT_FOUND.to_string()),
            LocationError::Invalid(errors) => Self::Invalid(errors),
            LocationError::DuplicateCode(_) => Self::DuplicateCode,
            LocationError::Repo(e) => {
                tracing::error!(error = %e, code = code.as_str(), "{message}");
                Self::Internal {
                    code,
                    message,
                    details: debug.then(|| e.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::failed(message))).into_response()
            }
            ApiError::Invalid(errors) => {
                let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
                let body = ErrorResponse::new(ErrorCode::InvalidParam, VALIDATION_FAILED)
                    .with_details(details);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::DuplicateCode => {
                let body = ErrorResponse::new(ErrorCode::DuplicateCode, VALIDATION_FAILED)
                    .with_details(json!({ "code": [DUPLICATE_CODE_MESSAGE] }));
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Internal {
                code,
                message,
                details,
            } => {
                let mut body = ErrorResponse::new(code, message);
                if let Some(details) = details {
                    body = body.with_details(json!(details));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Invalid(errors)
    }
}
