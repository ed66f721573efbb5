//! Config carrier
//!
//! A [`Config`] holds the one [`HttpClient`] shared by every endpoint client
//! built from it. Endpoint clients clone the `Config`, which only bumps a
//! reference count; the HTTP client and its cookie jar stay shared.

use std::sync::Arc;

use crate::http::{ClientOption, HttpClient, Result};

/// Shared configuration for endpoint clients
#[derive(Debug, Clone)]
pub struct Config {
    client: Arc<HttpClient>,
}

impl Config {
    /// Wrap an existing HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Build a client for `endpoint` and apply `options` to it
    pub fn with_endpoint(
        endpoint: &str,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self> {
        let client = HttpClient::new(endpoint)?.with(options);
        Ok(Self::new(client))
    }

    /// Endpoint from `UP_ENDPOINT`, falling back to the public API
    pub fn from_env() -> Result<Self> {
        Self::with_endpoint(&endpoint_from_env(), [])
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

/// Effective endpoint (UP_ENDPOINT > public default)
pub fn endpoint_from_env() -> String {
    std::env::var(crate::ENDPOINT_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| crate::DEFAULT_ENDPOINT.to_string())
}
