//! Error types for the Graph provider.

use thiserror::Error;

/// Graph provider errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Token acquisition failed before the API call was attempted
    #[error("authentication failed: {0}")]
    Auth(#[from] core_auth::AuthError),

    /// API request returned a non-success status
    #[error("Graph API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// Failed to parse an API response body
    #[error("failed to parse API response: {0}")]
    Parse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),
}

/// Result type for Graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
