//! Transport capability for the two network calls of a submission.
//!
//! `UploadTransport` is the seam between flow logic and HTTP: the hub app
//! hands the flow an [`HttpTransport`], tests script a mock. Neither call
//! retries — the caller decides whether to re-run the whole submission.

use std::future::Future;
use std::pin::Pin;

use calibra_protocol::constants::CONTENT_TYPE_GZIP;
use calibra_protocol::{PresignRequest, PresignResponse};
use tracing::debug;

use crate::config::EndpointConfig;
use crate::error::{ConfigError, ResolverError, TransferError};
use crate::types::{SelectedFile, UploadTarget};

/// Abstract network capability of the upload flow.
///
/// Both methods are single request-response exchanges. Using a trait keeps
/// the flow decoupled from any concrete HTTP stack and testable with mocks.
pub trait UploadTransport: Send + Sync {
    /// Exchanges the presign request for a one-time upload target.
    fn resolve(
        &self,
        request: &PresignRequest,
    ) -> Pin<Box<dyn Future<Output = Result<UploadTarget, ResolverError>> + Send + '_>>;

    /// Writes the full file content to the upload target.
    fn transfer(
        &self,
        target: &UploadTarget,
        file: &SelectedFile,
    ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + '_>>;
}

/// Production transport on a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpTransport {
    /// Wraps an existing client. The hub shares one client across features.
    pub fn new(client: reqwest::Client, upload_url: impl Into<String>) -> Self {
        Self {
            client,
            upload_url: upload_url.into(),
        }
    }

    /// Builds a dedicated client from the endpoint configuration.
    pub fn from_config(config: &EndpointConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self::new(client, config.upload_url.clone()))
    }
}

impl UploadTransport for HttpTransport {
    fn resolve(
        &self,
        request: &PresignRequest,
    ) -> Pin<Box<dyn Future<Output = Result<UploadTarget, ResolverError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(async move {
            let response = self
                .client
                .post(&self.upload_url)
                .json(&request)
                .send()
                .await
                .map_err(|e| ResolverError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ResolverError::Http(status.as_u16()));
            }

            let parsed: PresignResponse = response
                .json()
                .await
                .map_err(|_| ResolverError::MalformedResponse)?;
            if parsed.presigned_url.is_empty() {
                return Err(ResolverError::MalformedResponse);
            }

            debug!(run_id = %request.run_id, "upload target resolved");
            Ok(UploadTarget {
                presigned_url: parsed.presigned_url,
            })
        })
    }

    fn transfer(
        &self,
        target: &UploadTarget,
        file: &SelectedFile,
    ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + '_>> {
        let url = target.presigned_url.clone();
        let file_name = file.name.clone();
        let body = file.data.clone();
        Box::pin(async move {
            // The destination bucket expects gzip no matter what the picker
            // declared for the file.
            let response = self
                .client
                .put(&url)
                .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_GZIP)
                .body(body)
                .send()
                .await
                .map_err(|e| TransferError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransferError::Http(status.as_u16()));
            }

            debug!(file = %file_name, "transfer accepted");
            Ok(())
        })
    }
}
