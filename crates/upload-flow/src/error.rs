//! Upload flow error types.

use thiserror::Error;

/// Rejections produced by input validation, before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no file selected")]
    MissingFile,

    #[error("more than one file selected")]
    MultipleFiles,

    #[error("unsupported file type, expected a gzip archive")]
    UnsupportedType,
}

/// Failures while exchanging the presign request for an upload target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    #[error("presign endpoint returned HTTP {0}")]
    Http(u16),

    #[error("presign response did not contain a usable upload URL")]
    MalformedResponse,

    #[error("network error reaching presign endpoint: {0}")]
    Network(String),
}

/// Failures while writing the archive to the presigned URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("upload target returned HTTP {0}")]
    Http(u16),

    #[error("network error during transfer: {0}")]
    Network(String),
}

/// Endpoint configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("upload endpoint is not configured (set {0})")]
    MissingEndpoint(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Any terminal error of a single submission.
///
/// Every variant is recoverable by re-submitting; none is fatal to the
/// hosting process. A failed transfer always means a whole new submission
/// (fresh run id, fresh presign exchange) — the old target may be
/// single-use or expired.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not resolve upload target: {0}")]
    Resolver(#[from] ResolverError),

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),
}
