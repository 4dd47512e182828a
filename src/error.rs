// src/error.rs
// Error taxonomy for the timesheet workflow and the Productive gateway

use thiserror::Error;

/// Main error type for the productive library
#[derive(Error, Debug)]
pub enum ProductiveError {
    #[error("malformed duration '{0}': expected forms like 2h, 1.5 hours, 90m, 45 minutes or 2.5")]
    MalformedDuration(String),

    #[error("malformed date '{0}': expected today, yesterday or YYYY-MM-DD")]
    MalformedDate(String),

    #[error(
        "person_id \"me\" requires PRODUCTIVE_USER_ID to be configured; pass an explicit person id instead"
    )]
    NoActorConfigured,

    #[error("missing required field {field}: {reason}")]
    MissingRequiredField { field: &'static str, reason: String },

    #[error("Productive API rejected the request ({status}): {detail}")]
    UpstreamRejected { status: u16, detail: String },

    #[error("invalid input: {0}")]
    InvalidInputShape(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using ProductiveError
pub type Result<T> = std::result::Result<T, ProductiveError>;

impl ProductiveError {
    pub fn missing(field: &'static str, reason: impl Into<String>) -> Self {
        ProductiveError::MissingRequiredField {
            field,
            reason: reason.into(),
        }
    }

    /// True for failures detected before any request reached Productive.
    ///
    /// Anything that happened after a request was sent (rejection, transport
    /// failure, unreadable response) is not local.
    pub fn is_local(&self) -> bool {
        match self {
            ProductiveError::UpstreamRejected { .. }
            | ProductiveError::Http(_)
            | ProductiveError::Json(_) => false,
            _ => true,
        }
    }

    /// Convert to user-facing string for MCP tool boundaries
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}

impl From<ProductiveError> for String {
    fn from(err: ProductiveError) -> Self {
        err.to_user_string()
    }
}
