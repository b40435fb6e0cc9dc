use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the bdp workspace.
///
/// Covers payload encoding, transport failures, non-success responses from the
/// writer, response decoding, configuration problems and fixture file access.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BdpError {
    /// The payload could not be serialized to the wire format.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Network or connection failure reported by the transport.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The writer answered with a status outside the accepted success set.
    #[error("bdp request returned non-OK status {status}: {body}")]
    RemoteStatus {
        /// Observed HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("decoding failed: {0}")]
    Decoding(String),

    /// Missing or invalid client configuration (base URL, provenance name, ...).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading or writing a local file failed.
    #[error("io error: {0}")]
    Io(String),
}

impl BdpError {
    /// Helper: build a `RemoteStatus` error from a status code and response body.
    pub fn remote_status(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteStatus {
            status,
            body: body.into(),
        }
    }

    /// Helper: build a `Transport` error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the HTTP status for `RemoteStatus` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the writer answered but rejected the request.
    #[must_use]
    pub const fn is_remote_status(&self) -> bool {
        matches!(self, Self::RemoteStatus { .. })
    }
}

impl From<std::io::Error> for BdpError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
