//! Error types for the Kidsout SDK.

use thiserror::Error;

/// Result type for Kidsout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Kidsout SDK.
///
/// An unresolved relationship is never an error: view accessors return
/// `None` for it.
#[derive(Error, Debug)]
pub enum Error {
    /// Request parameters failed client-side validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Summary message (the first issue).
        message: String,
        /// Every rule that failed, in check order.
        issues: Vec<String>,
    },

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Additional detail
        detail: Option<String>,
    },

    /// Rate limit exceeded.
    #[error("Rate limited. Retry after {retry_after} seconds")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after: u64,
        /// Error message
        message: String,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Access forbidden.
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl Error {
    /// Build a validation error from the collected issues.
    ///
    /// Returns `None` when there is nothing to report.
    pub(crate) fn from_issues(issues: Vec<String>) -> Option<Self> {
        let message = issues.first()?.clone();
        Some(Error::Validation { message, issues })
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::RateLimit { .. } => Some(429),
            Error::Authentication(_) => Some(401),
            Error::Forbidden(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from a response.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let body: std::result::Result<ErrorResponse, _> = response.json().await;
        let (message, detail) = match body {
            Ok(err) => (
                err.message
                    .or(err.error)
                    .unwrap_or_else(|| "Unknown error".into()),
                err.detail,
            ),
            Err(_) => ("Unknown error".into(), None),
        };

        match status {
            401 => Error::Authentication(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            429 => Error::RateLimit {
                retry_after,
                message,
            },
            _ => Error::Api {
                status,
                message,
                detail,
            },
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
}
