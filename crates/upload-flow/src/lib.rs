//! Hub dataset upload flow: validate, presign, transfer, report.
//!
//! This crate implements the **business logic** for submitting a dataset
//! archive from the hub to the processing backend. It is a library crate
//! with no UI dependencies — the hub app drives [`UploadFlow`] from its
//! event handlers and renders the events and outcome it emits.
//!
//! # Pipeline
//!
//! 1. **Validate** — exactly one selected file, gzip content type
//! 2. **Resolve** — exchange (run id, dataset, file name) for a presigned URL
//! 3. **Transfer** — PUT the archive bytes to the presigned URL
//! 4. **Report** — settle on one terminal Succeeded/Failed/Cancelled outcome
//!
//! Network access sits behind the [`UploadTransport`] trait; production
//! code uses [`HttpTransport`], tests script a mock.

pub mod config;
pub mod error;
pub mod flow;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export primary types for convenience.
pub use config::EndpointConfig;
pub use error::{ConfigError, ResolverError, TransferError, UploadError, ValidationError};
pub use flow::UploadFlow;
pub use transport::{HttpTransport, UploadTransport};
pub use types::{
    RunId, SelectedFile, SubmissionRequest, UploadEvent, UploadOutcome, UploadTarget,
};
pub use validation::validate;
