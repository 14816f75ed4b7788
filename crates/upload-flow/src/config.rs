//! Upload endpoint configuration.
//!
//! One environment-provided value drives the whole flow: the presign
//! endpoint URL. The request timeout is optional tuning forwarded to the
//! HTTP transport; `None` keeps the transport default.

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable supplying the presign endpoint URL.
pub const UPLOAD_URL_ENV: &str = "CALIBRA_UPLOAD_URL";

/// Presign endpoint plus transport tuning for one hub instance.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// URL the presign request is POSTed to.
    pub upload_url: String,

    /// Per-request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl EndpointConfig {
    /// Builds a config from an explicit endpoint URL.
    pub fn new(upload_url: impl Into<String>) -> Result<Self, ConfigError> {
        let upload_url = upload_url.into();
        if upload_url.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint(UPLOAD_URL_ENV));
        }
        Ok(Self {
            upload_url,
            request_timeout: None,
        })
    }

    /// Reads the endpoint URL from [`UPLOAD_URL_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(UPLOAD_URL_ENV) {
            Ok(url) => Self::new(url),
            Err(_) => Err(ConfigError::MissingEndpoint(UPLOAD_URL_ENV)),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
