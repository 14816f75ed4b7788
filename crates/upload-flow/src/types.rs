//! Data types for the upload flow.

use std::fmt;
use std::io;
use std::path::Path;

use uuid::Uuid;

use crate::error::UploadError;

/// A file as handed over by the file picker.
///
/// `content_type` is whatever the picker declared; validation decides
/// whether it is acceptable, and the transfer declares its own content
/// type on the wire regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    /// Creates a file handle from in-memory content.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Loads a file from disk, inferring the declared content type from
    /// the extension. Callers without a picker (tests, CLI glue) use this.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = std::fs::read(path)?;
        let content_type = detect_content_type(&name).to_string();
        Ok(Self {
            name,
            content_type,
            data,
        })
    }
}

/// Detects a MIME content type from a file name extension.
fn detect_content_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("gz") | Some("tgz") => calibra_protocol::constants::CONTENT_TYPE_GZIP,
        _ => "application/octet-stream",
    }
}

/// Dataset name plus the raw file selection, as collected by the form.
///
/// Owned by the invoking UI until handed to the flow. `files` keeps the
/// full selection so multi-selection can be rejected explicitly instead
/// of silently using the first entry.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub dataset: String,
    pub files: Vec<SelectedFile>,
}

impl SubmissionRequest {
    /// Builds a request for a single selected file.
    pub fn single(dataset: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            dataset: dataset.into(),
            files: vec![file],
        }
    }
}

/// Per-submission unique token, namespacing one upload server-side.
///
/// Generated client-side, never persisted beyond the presign request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    /// Mints a fresh run id. Unique with overwhelming probability across
    /// concurrent submissions from the same or different clients.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Time-limited upload destination issued by the backend.
///
/// Consumed by exactly one transfer; never cached or reused across
/// submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub presigned_url: String,
}

/// Progress event emitted while a submission runs.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// Input validation started.
    Validating,
    /// Presign exchange in flight.
    Resolving { run_id: String },
    /// Archive bytes going to the presigned URL.
    Transferring { file_name: String },
    /// Submission finished successfully.
    Completed { file_name: String },
    /// Submission failed.
    Failed { error: String },
    /// Submission was cancelled by the caller.
    Cancelled,
}

/// Terminal result of one submission. Never retried automatically.
#[derive(Debug)]
pub enum UploadOutcome {
    Succeeded { file_name: String },
    Failed(UploadError),
    Cancelled,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded { .. })
    }
}
