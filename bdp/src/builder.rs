use std::sync::Arc;
use std::time::Duration;

use bdp_core::{BdpConfig, BdpError, StaticToken, TokenProvider, Transport};

use crate::client::BdpClient;
use crate::http::ReqwestTransport;

/// Builder for constructing a [`BdpClient`].
pub struct BdpClientBuilder {
    cfg: BdpConfig,
    transport: Option<Arc<dyn Transport>>,
    tokens: Option<Arc<dyn TokenProvider>>,
    timeout: Option<Duration>,
    provenance_id: Option<String>,
}

impl Default for BdpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BdpClientBuilder {
    /// Create a builder with an empty configuration.
    ///
    /// A base URL, a provenance name and a token provider are required
    /// before [`build`](Self::build) succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: BdpConfig::default(),
            transport: None,
            tokens: None,
            timeout: None,
            provenance_id: None,
        }
    }

    /// Replace the whole configuration, e.g. with [`BdpConfig::from_env`].
    #[must_use]
    pub fn config(mut self, cfg: BdpConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Writer endpoint including the `/json` suffix.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.cfg.base_url = url.into();
        self
    }

    /// Collector name and version, sent as `prn`/`prv` and registered as provenance.
    #[must_use]
    pub fn provenance(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.cfg.provenance_name = name.into();
        self.cfg.provenance_version = version.into();
        self
    }

    /// Origin tag of this collector.
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.cfg.origin = origin.into();
        self
    }

    /// Use a custom transport instead of the reqwest default.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Source of bearer tokens.
    #[must_use]
    pub fn token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Shortcut for a fixed bearer token.
    #[must_use]
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.token_provider(Arc::new(StaticToken::new(token)))
    }

    /// Request timeout of the default transport. Ignored with a custom transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resume a session whose provenance is already registered under `id`.
    #[must_use]
    pub fn provenance_id(mut self, id: impl Into<String>) -> Self {
        self.provenance_id = Some(id.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `BdpError::Config` if the base URL is missing or invalid, the
    /// provenance name is empty, no token provider is set, or the default
    /// transport cannot be constructed.
    pub fn build(self) -> Result<BdpClient, BdpError> {
        if self.cfg.base_url.is_empty() {
            return Err(BdpError::config("base url is not set"));
        }
        if self.cfg.provenance_name.is_empty() {
            return Err(BdpError::config("provenance name is not set"));
        }
        let tokens = self
            .tokens
            .ok_or_else(|| BdpError::config("token provider is not set"))?;
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => match self.timeout {
                Some(timeout) => Arc::new(ReqwestTransport::with_timeout(timeout)?),
                None => Arc::new(ReqwestTransport::new()?),
            },
        };
        BdpClient::from_parts(&self.cfg, transport, tokens, self.provenance_id)
    }
}
