//! Request/response payloads for the presign exchange.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Asks the backend for a presigned upload URL.
///
/// `run_id` namespaces the upload server-side; the backend never sees the
/// file content here, only the name it will be stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    pub run_id: String,
    pub dataset: String,
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Backend response to a presign request.
///
/// The backend may attach more fields (expiry, object key, ...); only
/// `presignedUrl` is consumed by the hub, the rest is ignored on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub presigned_url: String,
}
