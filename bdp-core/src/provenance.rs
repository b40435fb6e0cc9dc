//! Memoized provenance registration.
//!
//! Every data-bearing operation must carry the identifier of a provenance
//! record on the writer. The [`ProvenanceRegistrar`] creates that record at
//! most once per session: the first caller performs the registration while
//! holding an async gate, later and concurrent callers observe the cached
//! identifier. A failed registration leaves the registrar unregistered so the
//! next operation retries.

use std::sync::OnceLock;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{BdpError, Provenance};

/// Remote side of a registration: create the provenance record, return its id.
#[async_trait]
pub trait RegisterProvenance: Send + Sync {
    /// Send one registration request.
    async fn register_provenance(&self, provenance: &Provenance) -> Result<String, BdpError>;
}

/// Registration state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvenanceState {
    /// No identifier yet; the next data-bearing call registers.
    Unregistered,
    /// Identifier cached for the rest of the session.
    Registered(String),
}

/// Session object owning the provenance descriptor and its remote identifier.
#[derive(Debug)]
pub struct ProvenanceRegistrar {
    provenance: Provenance,
    id: OnceLock<String>,
    gate: Mutex<()>,
}

impl ProvenanceRegistrar {
    /// Create an unregistered session for `provenance`.
    #[must_use]
    pub fn new(provenance: Provenance) -> Self {
        Self {
            provenance,
            id: OnceLock::new(),
            gate: Mutex::new(()),
        }
    }

    /// Create a session that is already registered under `id`.
    #[must_use]
    pub fn registered(provenance: Provenance, id: impl Into<String>) -> Self {
        let me = Self::new(provenance);
        let _ = me.id.set(id.into());
        me
    }

    /// The descriptor sent on registration.
    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Current state. Never blocks.
    #[must_use]
    pub fn state(&self) -> ProvenanceState {
        self.id
            .get()
            .map_or(ProvenanceState::Unregistered, |id| {
                ProvenanceState::Registered(id.clone())
            })
    }

    /// Cached identifier, if registered.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.id.get().map(String::as_str)
    }

    /// Return the session identifier, registering through `remote` first if
    /// this session has not registered yet.
    ///
    /// Concurrent first calls are serialized: exactly one of them talks to
    /// `remote`, the others wait and reuse its result.
    ///
    /// # Errors
    /// Propagates the registration failure; an empty identifier is reported
    /// as `BdpError::Decoding`. In both cases the session stays unregistered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bdp::provenance::ensure_registered",
            skip(self, remote),
            fields(collector = %self.provenance.data_collector),
        )
    )]
    pub async fn ensure_registered(
        &self,
        remote: &dyn RegisterProvenance,
    ) -> Result<&str, BdpError> {
        if let Some(id) = self.identifier() {
            return Ok(id);
        }
        let _guard = self.gate.lock().await;
        // another caller may have finished while we waited
        if let Some(id) = self.identifier() {
            return Ok(id);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            prn = %self.provenance.data_collector,
            prv = %self.provenance.data_collector_version,
            "pushing provenance"
        );
        let raw = remote.register_provenance(&self.provenance).await?;
        let id = raw.trim();
        if id.is_empty() {
            return Err(BdpError::Decoding(
                "provenance registration returned an empty identifier".to_string(),
            ));
        }
        let id = self.id.get_or_init(|| id.to_string());
        #[cfg(feature = "tracing")]
        tracing::info!(uuid = %id, "pushing provenance done");
        Ok(id.as_str())
    }
}
