//! Error types for the recipe server client

use thiserror::Error;

/// Errors that can occur when talking to the recipe server
#[derive(Debug, Error)]
pub enum ApiError {
    /// A URL could not be parsed or resolved
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending URL or path
        url: String,
        /// Parser message
        reason: String,
    },

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// The API index has no endpoint with this name
    #[error("Unknown API endpoint: {0}")]
    UnknownEndpoint(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a [`ApiError::Status`] error
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
