//! Seams to the HTTP transport and the bearer-token source.
//!
//! The client core only depends on these contracts; `bdp` ships a
//! reqwest-backed [`Transport`] and tests inject scripted ones.

use async_trait::async_trait;

use crate::BdpError;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read-only request.
    Get,
    /// Write request carrying a JSON body.
    Post,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outbound JSON-over-HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully qualified URL including query parameters.
    pub url: String,
    /// Serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
    /// Bearer token for the `Authorization` header.
    pub bearer_token: String,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Build a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Accept `200 OK` and `201 Created`, the statuses the writer uses for writes.
    ///
    /// # Errors
    /// Returns `BdpError::RemoteStatus` for any other status.
    pub fn accept_write(self) -> Result<String, BdpError> {
        match self.status {
            200 | 201 => Ok(self.body),
            status => Err(BdpError::remote_status(status, self.body)),
        }
    }

    /// Accept only `200 OK`, as required for queries.
    ///
    /// # Errors
    /// Returns `BdpError::RemoteStatus` for any other status.
    pub fn accept_ok(self) -> Result<String, BdpError> {
        match self.status {
            200 => Ok(self.body),
            status => Err(BdpError::remote_status(status, self.body)),
        }
    }
}

/// Performs a single request. No retries, no redirects handling beyond what
/// the implementation does by default.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` and return status and body.
    ///
    /// Connection-level failures map to `BdpError::Transport`.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BdpError>;
}

/// Source of bearer tokens. Caching and refreshing are up to the implementation.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a currently valid access token.
    async fn token(&self) -> Result<String, BdpError>;
}

/// Token provider returning a fixed token.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a pre-acquired token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String, BdpError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_accepts_ok_and_created() {
        assert_eq!(TransportResponse::new(200, "a").accept_write(), Ok("a".into()));
        assert_eq!(TransportResponse::new(201, "b").accept_write(), Ok("b".into()));
        assert_eq!(
            TransportResponse::new(204, "").accept_write(),
            Err(BdpError::remote_status(204, ""))
        );
    }

    #[test]
    fn query_accepts_only_ok() {
        assert!(TransportResponse::new(200, "[]").accept_ok().is_ok());
        let err = TransportResponse::new(201, "[]").accept_ok().unwrap_err();
        assert_eq!(err.status(), Some(201));
    }

    #[tokio::test]
    async fn static_token_is_returned_verbatim() {
        let t = StaticToken::new("abc");
        assert_eq!(t.token().await.unwrap(), "abc");
    }
}
