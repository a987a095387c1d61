//! Client-credentials token acquisition.
//!
//! Implements the OAuth 2.0 client-credentials grant (RFC 6749 §4.4)
//! against the Microsoft identity platform v2.0 token endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use core_http::{HttpClient, HttpMethod, HttpRequest};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::credentials::ClientCredentials;
use crate::error::{AuthError, Result};
use crate::token::AccessToken;

/// Default authority host for the worldwide Microsoft identity platform.
const DEFAULT_AUTHORITY_HOST: &str = "login.microsoftonline.com";

/// Source of bearer tokens for outbound API calls.
///
/// Every call returns a freshly issued token; implementations must not
/// cache or share tokens between calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] when the endpoint is unreachable,
    /// [`AuthError::TokenEndpoint`] on a non-success status, and
    /// [`AuthError::MalformedResponse`] when the body cannot be parsed.
    async fn fetch_token(&self) -> Result<AccessToken>;
}

/// Token provider using the client-credentials grant.
///
/// Issues a form-encoded POST to
/// `https://{authority}/{tenant_id}/oauth2/v2.0/token/` carrying exactly
/// `grant_type`, `client_secret`, `scope` and `client_id`. That is the
/// full parameter contract for this grant; there is no `redirect_uri`.
/// Transport and endpoint failures propagate unchanged to the caller:
/// no retry, no backoff.
///
/// # Example
///
/// ```ignore
/// use core_auth::{ClientCredentials, ClientCredentialsProvider, TokenSource};
///
/// let provider = ClientCredentialsProvider::new(credentials, http_client);
/// let token = provider.fetch_token().await?;
/// ```
pub struct ClientCredentialsProvider {
    credentials: ClientCredentials,
    http_client: Arc<dyn HttpClient>,
    token_url: String,
}

impl ClientCredentialsProvider {
    /// Create a provider for the worldwide authority.
    pub fn new(credentials: ClientCredentials, http_client: Arc<dyn HttpClient>) -> Self {
        let token_url = token_url_for(DEFAULT_AUTHORITY_HOST, &credentials.tenant_id);
        Self {
            credentials,
            http_client,
            token_url,
        }
    }

    /// Override the authority host (sovereign clouds, test servers).
    pub fn with_authority(mut self, authority_host: impl Into<String>) -> Self {
        self.token_url = token_url_for(&authority_host.into(), &self.credentials.tenant_id);
        self
    }

    /// The token endpoint this provider posts to.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

fn token_url_for(authority_host: &str, tenant_id: &str) -> String {
    format!(
        "https://{}/{}/oauth2/v2.0/token/",
        authority_host, tenant_id
    )
}

#[async_trait]
impl TokenSource for ClientCredentialsProvider {
    #[instrument(skip(self), fields(tenant_id = %self.credentials.tenant_id))]
    async fn fetch_token(&self) -> Result<AccessToken> {
        let scope = self.credentials.default_scope();

        let mut params = HashMap::new();
        params.insert("grant_type", "client_credentials");
        params.insert("client_secret", self.credentials.client_secret.as_str());
        params.insert("scope", scope.as_str());
        params.insert("client_id", self.credentials.client_id.as_str());

        let encoded_body = serde_urlencoded::to_string(&params)
            .map_err(|e| AuthError::Other(format!("Failed to encode token request: {}", e)))?;

        debug!("Requesting client-credentials token");

        let request = HttpRequest::new(HttpMethod::Post, self.token_url.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Bytes::from(encoded_body));

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.is_success() {
            let status = response.status;
            let message = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            warn!(status = status, error = %message, "Token request failed");

            return Err(AuthError::TokenEndpoint { status, message });
        }

        let token_response: TokenResponse = response
            .json()
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        debug!(
            expires_in = token_response.expires_in,
            ext_expires_in = ?token_response.ext_expires_in,
            "Token issued"
        );

        Ok(AccessToken::new(
            token_response.access_token,
            token_response
                .token_type
                .unwrap_or_else(|| "Bearer".to_string()),
            token_response.expires_in,
        ))
    }
}

/// Token response from the identity platform.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    #[serde(default)]
    ext_expires_in: Option<i64>,
}

fn default_expires_in() -> i64 {
    3600 // Default to 1 hour if not specified
}
