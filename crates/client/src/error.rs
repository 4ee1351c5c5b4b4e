//! Client error classification.

use std::collections::BTreeMap;

use locatr_shared::ErrorCode;

/// Failures of an API call, classified by what the caller can do about them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// Missing or wrong API key.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The server rejected the input (422).
    #[error("{message}")]
    Validation {
        message: String,
        code: ErrorCode,
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Per-field messages of a validation failure; empty for other errors.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            Self::Validation { fields, .. } => fields.clone(),
            _ => BTreeMap::new(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// One-line text for an error banner.
    ///
    /// Validation failures list every field message after the summary.
    pub fn display_message(&self) -> String {
        match self {
            Self::Network(_) => "Connection error. Check your network connection.".to_string(),
            Self::Validation {
                message, fields, ..
            } if !fields.is_empty() => {
                let details: Vec<&str> = fields
                    .values()
                    .flatten()
                    .map(String::as_str)
                    .collect();
                format!("{message}: {}", details.join(", "))
            }
            Self::Validation { message, .. } => message.clone(),
            Self::Unauthorized(message) | Self::NotFound(message) => message.clone(),
            Self::Server { message, .. } => message.clone(),
            Self::Config(_) | Self::Decode(_) => "An unexpected error occurred".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
