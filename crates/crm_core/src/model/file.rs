//! File entity.

use super::ids::{ContactId, FileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded document or external link.
///
/// `data_url` is opaque to the store: either an embedded `data:` URI or a
/// link to external content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmFile {
    pub id: FileId,
    pub name: String,
    /// Display type, usually the upper-cased extension (`PDF`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable size (`2.3 MB`).
    pub size: String,
    /// Assigned by the store on creation; updates never change it.
    pub upload_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
    pub data_url: String,
}

/// Creation payload for [`CrmFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    pub data_url: String,
}

impl CrmFile {
    /// Whether the payload is embedded content rather than an external link.
    pub fn is_embedded(&self) -> bool {
        self.data_url.starts_with("data:")
    }
}
