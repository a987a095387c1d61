//! # Service Configuration
//!
//! Builder-validated configuration for the report upload service.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ServiceConfig;
//!
//! let config = ServiceConfig::builder()
//!     .tenant_id("my-tenant-id")
//!     .client_id("my-client-id")
//!     .client_secret("my-client-secret")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! The builder validates required fields and provides actionable error
//! messages when one is missing or blank.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use core_auth::ClientCredentials;
use core_http::HttpClient;

use crate::error::{Error, Result};

/// Default Graph resource the application token is scoped to.
pub const DEFAULT_RESOURCE_SCOPE: &str = "https://graph.microsoft.com";

/// Default folder prefix for uploaded reports.
pub const DEFAULT_UPLOAD_ROOT: &str = "reports/";

/// Default outbound request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Service configuration.
///
/// Holds the application credentials plus the settings the upload façade
/// needs. Use [`ServiceConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Application credentials for the client-credentials grant
    pub credentials: ClientCredentials,

    /// Folder prefix uploads default to, e.g. `"reports/"`
    pub upload_root: String,

    /// Timeout applied to each outbound request
    pub http_timeout: Duration,

    /// HTTP client override (defaults to the reqwest implementation)
    pub http_client: Option<Arc<dyn HttpClient>>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("credentials", &self.credentials)
            .field("upload_root", &self.upload_root)
            .field("http_timeout", &self.http_timeout)
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .finish()
    }
}

impl ServiceConfig {
    /// Create a builder with no fields set.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Load configuration from `GRAPH_*` environment variables.
    ///
    /// `GRAPH_TENANT_ID`, `GRAPH_CLIENT_ID` and `GRAPH_CLIENT_SECRET` are
    /// required; `GRAPH_RESOURCE_SCOPE` and `GRAPH_UPLOAD_ROOT` override
    /// the defaults when present.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder()
            .tenant_id(require_env("GRAPH_TENANT_ID")?)
            .client_id(require_env("GRAPH_CLIENT_ID")?)
            .client_secret(require_env("GRAPH_CLIENT_SECRET")?);

        if let Ok(scope) = env::var("GRAPH_RESOURCE_SCOPE") {
            builder = builder.resource_scope(scope);
        }
        if let Ok(root) = env::var("GRAPH_UPLOAD_ROOT") {
            builder = builder.upload_root(root);
        }

        builder.build()
    }
}

fn require_env(key: &str) -> Result<String> {
    env::var(key)
        .map_err(|_| Error::Config(format!("Missing required environment variable: {}", key)))
}

/// Builder for [`ServiceConfig`] with fail-fast validation.
#[derive(Default)]
pub struct ServiceConfigBuilder {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    resource_scope: Option<String>,
    upload_root: Option<String>,
    http_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl ServiceConfigBuilder {
    /// Directory (tenant) ID of the app registration (required)
    pub fn tenant_id(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = Some(value.into());
        self
    }

    /// Application (client) ID (required)
    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    /// Client secret of the app registration (required)
    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(value.into());
        self
    }

    /// Resource base URL tokens are scoped to
    pub fn resource_scope(mut self, value: impl Into<String>) -> Self {
        self.resource_scope = Some(value.into());
        self
    }

    /// Folder prefix uploads default to
    pub fn upload_root(mut self, value: impl Into<String>) -> Self {
        self.upload_root = Some(value.into());
        self
    }

    /// Timeout for outbound requests
    pub fn http_timeout(mut self, value: Duration) -> Self {
        self.http_timeout = Some(value);
        self
    }

    /// Inject a custom HTTP client implementation
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required field is missing or blank.
    pub fn build(self) -> Result<ServiceConfig> {
        let tenant_id = required(
            self.tenant_id,
            "tenant_id",
            "the directory (tenant) ID of the app registration",
        )?;
        let client_id = required(self.client_id, "client_id", "the application (client) ID")?;
        let client_secret = required(
            self.client_secret,
            "client_secret",
            "a client secret created for the app registration",
        )?;

        let resource_scope = self
            .resource_scope
            .unwrap_or_else(|| DEFAULT_RESOURCE_SCOPE.to_string());
        let upload_root = self
            .upload_root
            .unwrap_or_else(|| DEFAULT_UPLOAD_ROOT.to_string());
        let http_timeout = self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT);

        Ok(ServiceConfig {
            credentials: ClientCredentials::new(tenant_id, client_id, client_secret, resource_scope),
            upload_root,
            http_timeout,
            http_client: self.http_client,
        })
    }
}

fn required(value: Option<String>, field: &str, hint: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "Missing required field `{}`: provide {}",
            field, hint
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> ServiceConfigBuilder {
        ServiceConfig::builder()
            .tenant_id("t1")
            .client_id("c1")
            .client_secret("s3cret")
    }

    #[test]
    fn test_build_with_defaults() {
        let config = minimal_builder().build().unwrap();

        assert_eq!(config.credentials.tenant_id, "t1");
        assert_eq!(config.credentials.resource_scope, DEFAULT_RESOURCE_SCOPE);
        assert_eq!(config.upload_root, DEFAULT_UPLOAD_ROOT);
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
        assert!(config.http_client.is_none());
    }

    #[test]
    fn test_build_with_overrides() {
        let config = minimal_builder()
            .resource_scope("https://graph.microsoft.us")
            .upload_root("contoso/")
            .http_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.credentials.resource_scope, "https://graph.microsoft.us");
        assert_eq!(config.upload_root, "contoso/");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_tenant_id() {
        let result = ServiceConfig::builder()
            .client_id("c1")
            .client_secret("s3cret")
            .build();

        match result {
            Err(Error::Config(message)) => assert!(message.contains("tenant_id")),
            other => panic!("expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_blank_secret_rejected() {
        let result = ServiceConfig::builder()
            .tenant_id("t1")
            .client_id("c1")
            .client_secret("   ")
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = minimal_builder().build().unwrap();
        let debug_str = format!("{:?}", config);

        assert!(!debug_str.contains("s3cret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_env() {
        env::set_var("GRAPH_TENANT_ID", "env-tenant");
        env::set_var("GRAPH_CLIENT_ID", "env-client");
        env::set_var("GRAPH_CLIENT_SECRET", "env-secret");
        env::set_var("GRAPH_UPLOAD_ROOT", "env-root/");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.credentials.tenant_id, "env-tenant");
        assert_eq!(config.upload_root, "env-root/");

        env::remove_var("GRAPH_TENANT_ID");
        env::remove_var("GRAPH_CLIENT_ID");
        env::remove_var("GRAPH_CLIENT_SECRET");
        env::remove_var("GRAPH_UPLOAD_ROOT");

        assert!(ServiceConfig::from_env().is_err());
    }
}
