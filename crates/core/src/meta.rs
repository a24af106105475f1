//! Per-folder metadata records.

use serde::{Deserialize, Serialize};

/// Provenance record stored as a JSON sidecar next to each folder.
///
/// Written once at folder creation and never mutated. The `secret` field is
/// the masked audit form only; the full secret is never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMeta {
    /// Creation timestamp, seconds since the Unix epoch.
    pub created: i64,
    /// Network host of the creating client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// User-agent string of the creating client.
    #[serde(rename = "user-agent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Masked prefix of the secret that authorized creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// True when this record was synthesized from the directory's
    /// modification time because no sidecar exists. Synthesized records
    /// carry no provenance fields and are never written back.
    #[serde(skip)]
    pub synthesized: bool,
}

impl FolderMeta {
    /// Build a synthesized record from a directory modification time.
    pub fn synthesized(created: i64) -> Self {
        Self {
            created,
            host: None,
            user_agent: None,
            secret: None,
            synthesized: true,
        }
    }
}
