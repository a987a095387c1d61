//! Report upload façade and bootstrap helpers.
//!
//! Wires the HTTP client, token provider and Graph connector together and
//! exposes the entry point the web layer calls after it has authenticated
//! and authorized the human user: [`ReportUploader::upload_report`]. The
//! web layer owns routing, views and user-facing error translation; this
//! crate owns nothing beyond the authenticated-upload workflow.

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bytes::Bytes;
use core_auth::{ClientCredentialsProvider, TokenSource};
use core_http::{HttpClient, ReqwestHttpClient};
use core_runtime::ServiceConfig;
use provider_graph::{Drive, DriveItem, GraphConnector};
use tracing::info;

/// Primary façade exposed to host applications.
pub struct ReportUploader {
    connector: GraphConnector,
    upload_root: String,
}

impl ReportUploader {
    /// Create an uploader from a validated configuration.
    ///
    /// Builds the reqwest HTTP client (unless the configuration injects
    /// its own), the client-credentials token provider, and the Graph
    /// connector. One HTTP client instance is shared by the token and
    /// upload paths.
    pub fn new(config: ServiceConfig) -> Self {
        let http_client: Arc<dyn HttpClient> = match config.http_client {
            Some(client) => client,
            None => Arc::new(ReqwestHttpClient::with_timeout(config.http_timeout)),
        };

        let provider =
            ClientCredentialsProvider::new(config.credentials, Arc::clone(&http_client));
        let connector = GraphConnector::new(http_client, Arc::new(provider));

        Self {
            connector,
            upload_root: config.upload_root,
        }
    }

    /// Create an uploader from `GRAPH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = ServiceConfig::from_env()
            .map_err(|e| CoreError::InitializationFailed(e.to_string()))?;
        Ok(Self::new(config))
    }

    /// Create an uploader from explicit handles (tests, custom hosts).
    pub fn with_parts(
        http_client: Arc<dyn HttpClient>,
        token_source: Arc<dyn TokenSource>,
        upload_root: impl Into<String>,
    ) -> Self {
        Self {
            connector: GraphConnector::new(http_client, token_source),
            upload_root: upload_root.into(),
        }
    }

    /// Upload a generated report into a user's default drive.
    ///
    /// Called with the already-authorized user's directory object ID;
    /// this layer performs no human-user authentication of its own.
    /// `folder` overrides the configured upload root; `None` uses the
    /// default.
    pub async fn upload_report(
        &self,
        user_id: &str,
        file_name: &str,
        content: Bytes,
        folder: Option<&str>,
    ) -> Result<DriveItem> {
        let target_path = folder.unwrap_or(&self.upload_root);

        info!(
            user_id = %user_id,
            file_name = %file_name,
            target_path = %target_path,
            "Uploading report"
        );

        let item = self
            .connector
            .upload_to_user_drive(user_id, file_name, content, target_path)
            .await?;

        Ok(item)
    }

    /// Upload a generated report into an explicit drive.
    pub async fn upload_report_to_drive(
        &self,
        drive_id: &str,
        file_name: &str,
        content: Bytes,
        folder: Option<&str>,
    ) -> Result<DriveItem> {
        let target_path = folder.unwrap_or(&self.upload_root);

        let item = self
            .connector
            .upload_to_drive(drive_id, file_name, content, target_path)
            .await?;

        Ok(item)
    }

    /// Get a user's default (documents) drive.
    pub async fn user_drive(&self, user_id: &str) -> Result<Drive> {
        Ok(self.connector.user_drive(user_id).await?)
    }

    /// List the drives available to a user.
    pub async fn user_drives(&self, user_id: &str) -> Result<Vec<Drive>> {
        Ok(self.connector.user_drives(user_id).await?)
    }
}
