//! Wire types for Graph drive resources.

use serde::Deserialize;

/// Metadata record describing a stored drive item.
///
/// Returned by the upload endpoints; owned by the caller after return.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveItem {
    /// Item identifier assigned by the service
    pub id: String,
    /// Final item name
    pub name: String,
    /// Browser-accessible URL of the item
    #[serde(rename = "webUrl")]
    pub web_url: String,
}

/// A user's drive.
#[derive(Debug, Clone, Deserialize)]
pub struct Drive {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "webUrl", default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope for Graph collection responses.
#[derive(Debug, Deserialize)]
pub(crate) struct DriveListResponse {
    pub value: Vec<Drive>,
}
