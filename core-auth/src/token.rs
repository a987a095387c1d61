//! Bearer token returned by the token endpoint.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// OAuth 2.0 access token.
///
/// Created by each [`TokenSource::fetch_token`](crate::TokenSource::fetch_token)
/// call and discarded after the request it authorizes completes; nothing
/// in this workspace persists or reuses one.
///
/// # Security
///
/// Tokens should never be logged. The `Debug` implementation redacts the
/// token value.
#[derive(Clone)]
pub struct AccessToken {
    /// The bearer token used for API requests
    pub access_token: String,
    /// Token type reported by the endpoint (`Bearer` in practice)
    pub token_type: String,
    /// Seconds until expiry, as reported at issue time
    pub expires_in: i64,
    /// When the token was obtained (UTC)
    pub issued_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token stamped with the current time.
    pub fn new(access_token: String, token_type: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type,
            expires_in,
            issued_at: Utc::now(),
        }
    }

    /// When the token expires (UTC).
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::seconds(self.expires_in)
    }

    /// Check if the token is expired or expires within the default
    /// 60 second buffer.
    ///
    /// Provided for callers that hold a token across calls; the Graph
    /// connector fetches a fresh token per operation and never consults
    /// this.
    pub fn is_expired(&self) -> bool {
        self.is_expired_with_buffer(60)
    }

    /// Check if the token is expired with a custom buffer
    ///
    /// # Arguments
    ///
    /// * `buffer_seconds` - Seconds before expiration to consider expired
    pub fn is_expired_with_buffer(&self, buffer_seconds: i64) -> bool {
        Utc::now() >= self.expires_at() - Duration::seconds(buffer_seconds)
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
