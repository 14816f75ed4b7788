//! Wire types and constants for the Calibra upload backend contract.
//!
//! The hub exchanges two HTTP messages with the backend per submission:
//! a JSON presign request against the configured upload endpoint, and a
//! raw-bytes PUT against the presigned URL the backend hands back. This
//! crate holds the payload types and the constants both sides agree on.

pub mod constants;
pub mod messages;

pub use messages::{PresignRequest, PresignResponse};
