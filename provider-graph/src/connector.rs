//! Microsoft Graph drive connector.
//!
//! Uploads report files into user drives and answers drive metadata
//! queries against the Graph API v1.0.

use std::sync::Arc;

use bytes::Bytes;
use core_auth::TokenSource;
use core_http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use tracing::{debug, info, instrument, warn};

use crate::error::{GraphError, Result};
use crate::types::{Drive, DriveItem, DriveListResponse};

/// Graph API base URL
const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Microsoft Graph drive connector
///
/// Composes a token source with an HTTP client. Each operation is the
/// two-step sequence authenticate → request: exactly one token is fetched
/// per operation, never shared across calls, and file content is fully
/// buffered before the upload request is sent.
///
/// # Example
///
/// ```ignore
/// use provider_graph::GraphConnector;
///
/// let connector = GraphConnector::new(http_client, token_source);
/// let item = connector
///     .upload_to_user_drive("user-id", "report.xlsx", content, "reports/")
///     .await?;
/// println!("stored at {}", item.web_url);
/// ```
pub struct GraphConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Source of per-operation bearer tokens
    token_source: Arc<dyn TokenSource>,

    base_url: String,
}

impl GraphConnector {
    /// Create a new Graph connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `token_source` - Provider of application bearer tokens
    pub fn new(http_client: Arc<dyn HttpClient>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http_client,
            token_source,
            base_url: GRAPH_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Upload a file into a user's default drive.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Directory object ID of the drive owner
    /// * `file_name` - Name for the stored item
    /// * `content` - Raw file bytes; sent as-is, fully buffered
    /// * `target_path` - Folder prefix inside the drive, e.g. `"reports/"`
    #[instrument(skip(self, content), fields(user_id = %user_id, file_name = %file_name))]
    pub async fn upload_to_user_drive(
        &self,
        user_id: &str,
        file_name: &str,
        content: Bytes,
        target_path: &str,
    ) -> Result<DriveItem> {
        let url = self.content_url(
            &format!("users/{}/drive", urlencoding::encode(user_id)),
            file_name,
            target_path,
        );
        self.put_content(url, content).await
    }

    /// Upload a file into a specific drive.
    ///
    /// # Arguments
    ///
    /// * `drive_id` - Drive object ID
    /// * `file_name` - Name for the stored item
    /// * `content` - Raw file bytes; sent as-is, fully buffered
    /// * `target_path` - Folder prefix inside the drive, e.g. `"reports/"`
    #[instrument(skip(self, content), fields(drive_id = %drive_id, file_name = %file_name))]
    pub async fn upload_to_drive(
        &self,
        drive_id: &str,
        file_name: &str,
        content: Bytes,
        target_path: &str,
    ) -> Result<DriveItem> {
        let url = self.content_url(
            &format!("drives/{}", urlencoding::encode(drive_id)),
            file_name,
            target_path,
        );
        self.put_content(url, content).await
    }

    /// Get a user's default (documents) drive.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn user_drive(&self, user_id: &str) -> Result<Drive> {
        let url = format!(
            "{}/users/{}/drive",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self.get_authorized(url).await?;

        serde_json::from_slice(&response.body)
            .map_err(|e| GraphError::Parse(format!("Failed to parse drive: {}", e)))
    }

    /// List the drives available to a user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn user_drives(&self, user_id: &str) -> Result<Vec<Drive>> {
        let url = format!(
            "{}/users/{}/drives",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self.get_authorized(url).await?;

        let list: DriveListResponse = serde_json::from_slice(&response.body)
            .map_err(|e| GraphError::Parse(format!("Failed to parse drive list: {}", e)))?;

        info!("Listed {} drives", list.value.len());

        Ok(list.value)
    }

    /// Path-addressed content URL: `{base}/{root}/root:/{path}{name}:/content`
    fn content_url(&self, drive_root: &str, file_name: &str, target_path: &str) -> String {
        let item_path = encode_path(&format!("{}{}", target_path, file_name));
        format!("{}/{}/root:/{}:/content", self.base_url, drive_root, item_path)
    }

    async fn put_content(&self, url: String, content: Bytes) -> Result<DriveItem> {
        let token = self.token_source.fetch_token().await?;

        debug!(bytes = content.len(), "Uploading drive item");

        let request = HttpRequest::new(HttpMethod::Put, url)
            .bearer_token(token.access_token)
            .header("Content-Type", "application/octet-stream")
            .body(content);

        let response = check_success(self.execute(request).await?)?;

        let item: DriveItem = serde_json::from_slice(&response.body)
            .map_err(|e| GraphError::Parse(format!("Failed to parse drive item: {}", e)))?;

        info!(item_id = %item.id, "Uploaded drive item");

        Ok(item)
    }

    async fn get_authorized(&self, url: String) -> Result<HttpResponse> {
        let token = self.token_source.fetch_token().await?;

        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(token.access_token)
            .header("Accept", "application/json");

        check_success(self.execute(request).await?)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.http_client
            .execute(request)
            .await
            .map_err(|e| GraphError::Network(e.to_string()))
    }
}

/// Percent-encode a drive path, preserving `/` separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let status_code = response.status;
    let message = response
        .text()
        .unwrap_or_else(|_| "Unable to read error response".to_string());

    warn!(status = status_code, "Graph API request failed");

    Err(GraphError::Api {
        status_code,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_auth::{AccessToken, AuthError};
    use mockall::mock;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> core_http::Result<HttpResponse>;
        }
    }

    /// Token source that counts how many tokens it hands out.
    #[derive(Default)]
    struct CountingTokenSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenSource for CountingTokenSource {
        async fn fetch_token(&self) -> core_auth::Result<AccessToken> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AccessToken::new(
                "test_token".to_string(),
                "Bearer".to_string(),
                3600,
            ))
        }
    }

    struct FailingTokenSource;

    #[async_trait]
    impl TokenSource for FailingTokenSource {
        async fn fetch_token(&self) -> core_auth::Result<AccessToken> {
            Err(AuthError::TokenEndpoint {
                status: 401,
                message: "invalid_client".to_string(),
            })
        }
    }

    fn response(status: u16, body: &'static str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    const ITEM_JSON: &str = r#"{"id":"1","name":"r.xlsx","webUrl":"https://x"}"#;

    #[tokio::test]
    async fn test_upload_to_user_drive_success() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Put);
            assert_eq!(
                req.url,
                "https://graph.microsoft.com/v1.0/users/user-1/drive/root:/reports/r.xlsx:/content"
            );
            assert_eq!(
                req.headers.get("Authorization"),
                Some(&"Bearer test_token".to_string())
            );
            assert_eq!(req.body, Some(Bytes::from_static(b"report bytes")));

            Ok(response(200, ITEM_JSON))
        });

        let tokens = Arc::new(CountingTokenSource::default());
        let token_source: Arc<dyn TokenSource> = tokens.clone();
        let connector = GraphConnector::new(Arc::new(mock_http), token_source);

        let item = connector
            .upload_to_user_drive("user-1", "r.xlsx", Bytes::from_static(b"report bytes"), "reports/")
            .await
            .unwrap();

        assert_eq!(item.id, "1");
        assert_eq!(item.name, "r.xlsx");
        assert_eq!(item.web_url, "https://x");
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upload_body_bytes_unmodified() {
        // Every byte value survives the round trip into the PUT body
        let content: Vec<u8> = (0..=255u8).collect();
        let expected = Bytes::from(content.clone());

        let mut mock_http = MockHttpClient::new();
        let expected_in_mock = expected.clone();
        mock_http.expect_execute().times(1).returning(move |req| {
            assert_eq!(req.body.as_ref(), Some(&expected_in_mock));
            Ok(response(200, ITEM_JSON))
        });

        let connector = GraphConnector::new(
            Arc::new(mock_http),
            Arc::new(CountingTokenSource::default()),
        );

        connector
            .upload_to_user_drive("user-1", "blob.bin", expected, "")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_insufficient_storage() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(507, "Insufficient Storage")));

        let connector = GraphConnector::new(
            Arc::new(mock_http),
            Arc::new(CountingTokenSource::default()),
        );

        let result = connector
            .upload_to_user_drive("user-1", "r.xlsx", Bytes::from_static(b"x"), "reports/")
            .await;

        match result {
            Err(GraphError::Api { status_code, .. }) => assert_eq!(status_code, 507),
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_upload_token_failure_skips_api_call() {
        // No execute expectation: the upload must fail before any request
        let mock_http = MockHttpClient::new();

        let connector = GraphConnector::new(Arc::new(mock_http), Arc::new(FailingTokenSource));

        let result = connector
            .upload_to_user_drive("user-1", "r.xlsx", Bytes::from_static(b"x"), "reports/")
            .await;

        assert!(matches!(result, Err(GraphError::Auth(_))));
    }

    #[tokio::test]
    async fn test_concurrent_uploads_fetch_independent_tokens() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(2)
            .returning(|_| Ok(response(200, ITEM_JSON)));

        let tokens = Arc::new(CountingTokenSource::default());
        let token_source: Arc<dyn TokenSource> = tokens.clone();
        let connector = GraphConnector::new(Arc::new(mock_http), token_source);

        // In-flight at the same time against the shared connector
        let (a, b) = tokio::join!(
            connector.upload_to_user_drive("owner-a", "a.xlsx", Bytes::from_static(b"a"), "reports/"),
            connector.upload_to_user_drive("owner-b", "b.xlsx", Bytes::from_static(b"b"), "reports/"),
        );

        a.unwrap();
        b.unwrap();
        assert_eq!(tokens.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upload_to_drive_url() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(
                req.url,
                "https://graph.microsoft.com/v1.0/drives/d1/root:/archive/2026/r.xlsx:/content"
            );
            Ok(response(200, ITEM_JSON))
        });

        let connector = GraphConnector::new(
            Arc::new(mock_http),
            Arc::new(CountingTokenSource::default()),
        );

        connector
            .upload_to_drive("d1", "r.xlsx", Bytes::from_static(b"x"), "archive/2026/")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_user_drive() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Get);
            assert_eq!(
                req.url,
                "https://graph.microsoft.com/v1.0/users/user-1/drive"
            );
            assert!(req.headers.contains_key("Authorization"));

            Ok(response(
                200,
                r#"{"id":"d1","name":"OneDrive","webUrl":"https://od","description":"docs"}"#,
            ))
        });

        let connector = GraphConnector::new(
            Arc::new(mock_http),
            Arc::new(CountingTokenSource::default()),
        );

        let drive = connector.user_drive("user-1").await.unwrap();
        assert_eq!(drive.id, "d1");
        assert_eq!(drive.description, Some("docs".to_string()));
    }

    #[tokio::test]
    async fn test_user_drives() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(
                req.url,
                "https://graph.microsoft.com/v1.0/users/user-1/drives"
            );
            Ok(response(200, r#"{"value":[{"id":"d1"},{"id":"d2"}]}"#))
        });

        let connector = GraphConnector::new(
            Arc::new(mock_http),
            Arc::new(CountingTokenSource::default()),
        );

        let drives = connector.user_drives("user-1").await.unwrap();
        assert_eq!(drives.len(), 2);
        assert_eq!(drives[1].id, "d2");
    }

    #[tokio::test]
    async fn test_user_drive_not_found() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(404, "itemNotFound")));

        let connector = GraphConnector::new(
            Arc::new(mock_http),
            Arc::new(CountingTokenSource::default()),
        );

        let result = connector.user_drive("ghost").await;
        assert!(matches!(result, Err(GraphError::Api { status_code: 404, .. })));
    }

    #[test]
    fn test_encode_path_preserves_separators() {
        assert_eq!(encode_path("reports/r.xlsx"), "reports/r.xlsx");
        assert_eq!(
            encode_path("monthly reports/q1 summary.xlsx"),
            "monthly%20reports/q1%20summary.xlsx"
        );
    }
}
