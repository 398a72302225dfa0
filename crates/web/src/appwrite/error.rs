//! Error types for the Appwrite REST client.

use thiserror::Error;

/// Errors that can occur when talking to the Appwrite API.
#[derive(Debug, Error)]
pub enum AppwriteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Appwrite returned an error response.
    #[error("API error {status} ({error_type}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type identifier from the API, e.g. `database_already_exists`.
        error_type: String,
        /// Human-readable message from the API.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AppwriteError {
    /// Whether this is a 409 conflict (the resource already exists).
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Api { status: 409, .. })
    }

    /// Whether this is a 404 (the requested resource does not exist).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Whether the request was rejected for missing or invalid credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

/// Error body returned by the Appwrite API.
///
/// Every error response carries the same envelope:
/// `{"message": "...", "code": 409, "type": "database_already_exists", "version": "..."}`.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, repeated in the body.
    pub code: u16,
    /// Error type identifier.
    #[serde(rename = "type")]
    pub error_type: String,
}
