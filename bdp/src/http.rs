//! Production [`Transport`] backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use bdp_core::{BdpError, Method, Transport, TransportRequest, TransportResponse};
use reqwest::header::CONTENT_TYPE;

/// Sends requests with `reqwest`, adding the JSON content type and the
/// bearer authorization header.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build with a fresh `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `BdpError::Config` if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, BdpError> {
        Self::build(None)
    }

    /// Build with a request timeout.
    ///
    /// # Errors
    /// Returns `BdpError::Config` if the HTTP client cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, BdpError> {
        Self::build(Some(timeout))
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn build(timeout: Option<Duration>) -> Result<Self, BdpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| BdpError::config(format!("cannot build http client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BdpError> {
        let builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };
        let mut builder = builder
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&request.bearer_token);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(BdpError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(BdpError::transport)?;
        Ok(TransportResponse { status, body })
    }
}
