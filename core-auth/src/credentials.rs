//! Static application credentials for the client-credentials grant.

use std::fmt;

/// Application (daemon) credentials registered with the identity platform.
///
/// A flat configuration struct holding the four fields the token request
/// actually needs. Immutable for the lifetime of the process.
///
/// # Security
///
/// The client secret must never be logged. The `Debug` implementation
/// redacts it.
///
/// # Examples
///
/// ```
/// use core_auth::ClientCredentials;
///
/// let credentials = ClientCredentials::new(
///     "my-tenant-id",
///     "my-client-id",
///     "my-client-secret",
///     "https://graph.microsoft.com",
/// );
/// assert_eq!(
///     credentials.default_scope(),
///     "https://graph.microsoft.com/.default"
/// );
/// ```
#[derive(Clone)]
pub struct ClientCredentials {
    /// Directory (tenant) ID the token is issued for
    pub tenant_id: String,
    /// Application (client) ID
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Resource base URL the token grants access to,
    /// e.g. `https://graph.microsoft.com`
    pub resource_scope: String,
}

impl ClientCredentials {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        resource_scope: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            resource_scope: resource_scope.into(),
        }
    }

    /// The `scope` parameter sent to the token endpoint: `<resource>/.default`.
    pub fn default_scope(&self) -> String {
        format!("{}/.default", self.resource_scope.trim_end_matches('/'))
    }
}

// Custom Debug implementation to avoid logging secrets
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("resource_scope", &self.resource_scope)
            .finish()
    }
}
