//! HTTP transport implementation.
//!
//! The actual HTTP library is abstracted via `HttpClient` so the transport
//! can be exercised without a network; `ReqwestClient` is the production
//! implementation.

use crate::config::WfsConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::WfsTransport;
use tracing::debug;
use zonesync_core::{parse_feature_collection, Zone};

/// A plain HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP layer; errors are plain
/// messages so implementations stay library-agnostic.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> Result<HttpResponse, String>;

    /// Sends a POST request with an `application/xml` body.
    fn post_xml(&self, url: &str, body: &str) -> Result<HttpResponse, String>;
}

/// `reqwest`-backed HTTP client.
#[derive(Debug, Default)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        let response = self.client.get(url).send().map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }

    fn post_xml(&self, url: &str, body: &str) -> Result<HttpResponse, String> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(body.to_string())
            .send()
            .map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }
}

/// HTTP-based WFS transport.
///
/// Loads via a GetFeature query returning GeoJSON and saves via a
/// transaction POST.
pub struct HttpWfsTransport<C: HttpClient> {
    config: WfsConfig,
    client: C,
}

impl<C: HttpClient> HttpWfsTransport<C> {
    /// Creates a transport for the given endpoint configuration.
    pub fn new(config: WfsConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Returns the endpoint configuration.
    #[must_use]
    pub fn config(&self) -> &WfsConfig {
        &self.config
    }
}

impl<C: HttpClient> WfsTransport for HttpWfsTransport<C> {
    fn fetch_features(&self) -> SyncResult<Vec<Zone>> {
        let url = self.config.get_feature_url();
        debug!(%url, "fetching features");

        let response = self.client.get(&url).map_err(SyncError::Transport)?;
        if !response.is_success() {
            return Err(SyncError::Transport(format!(
                "GetFeature returned HTTP {}",
                response.status
            )));
        }

        Ok(parse_feature_collection(&response.body)?)
    }

    fn submit_transaction(&self, document: &str) -> SyncResult<()> {
        debug!(bytes = document.len(), "submitting transaction");

        let response = self
            .client
            .post_xml(&self.config.url, document)
            .map_err(SyncError::Transport)?;

        if response.is_success() {
            Ok(())
        } else {
            Err(SyncError::TransactionRejected {
                status: response.status,
                body: response.body,
            })
        }
    }
}
