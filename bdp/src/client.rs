use std::sync::Arc;

use async_trait::async_trait;
use bdp_core::{
    BdpConfig, BdpError, BdpWriter, DataMap, DataType, Event, Method, Provenance,
    ProvenanceRegistrar, ProvenanceState, RegisterProvenance, Station, StationSyncMode,
    TokenProvider, Transport, TransportRequest, TransportResponse,
};
use serde::Serialize;
use url::Url;

use crate::builder::BdpClientBuilder;
use crate::endpoints::Endpoints;

/// Live client for the timeseries writer.
///
/// One operation performs one outbound request (plus the one-time provenance
/// registration). Nothing is retried. The client is `Send + Sync` and meant
/// to be shared behind an `Arc`.
pub struct BdpClient {
    origin: String,
    session: ProvenanceRegistrar,
    wire: Wire,
}

/// Request plumbing shared by all operations.
struct Wire {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
}

impl Wire {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse, BdpError> {
        let bearer_token = self.tokens.token().await.map_err(|e| match e {
            BdpError::Transport(_) => e,
            other => BdpError::Transport(format!("token acquisition failed: {other}")),
        })?;
        #[cfg(feature = "tracing")]
        tracing::debug!(method = method.as_str(), url = %url, "bdp request");
        self.transport
            .execute(TransportRequest {
                method,
                url: url.into(),
                body,
                bearer_token,
            })
            .await
    }

    async fn post<T>(&self, url: Url, payload: &T) -> Result<String, BdpError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let body = serde_json::to_vec(payload).map_err(|e| BdpError::Encoding(e.to_string()))?;
        let response = self.send(Method::Post, url, Some(body)).await?;
        logged(response.accept_write())
    }
}

/// Log rejected responses with the same status rule that rejected them.
fn logged(accepted: Result<String, BdpError>) -> Result<String, BdpError> {
    #[cfg(feature = "tracing")]
    if let Err(BdpError::RemoteStatus { status, body }) = &accepted {
        tracing::error!(status_code = status, body = %body, "bdp request returned with error");
    }
    accepted
}

#[async_trait]
impl RegisterProvenance for Wire {
    async fn register_provenance(&self, provenance: &Provenance) -> Result<String, BdpError> {
        let url = self.endpoints.provenance()?;
        self.post(url, provenance).await
    }
}

impl BdpClient {
    /// Start building a client.
    #[must_use]
    pub fn builder() -> BdpClientBuilder {
        BdpClientBuilder::new()
    }

    /// Build from the `BDP_*` environment variables with the default transport.
    ///
    /// # Errors
    /// Returns `BdpError::Config` if a variable is missing or invalid.
    pub fn from_env(tokens: Arc<dyn TokenProvider>) -> Result<Self, BdpError> {
        Self::builder()
            .config(BdpConfig::from_env()?)
            .token_provider(tokens)
            .build()
    }

    pub(crate) fn from_parts(
        cfg: &BdpConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenProvider>,
        provenance_id: Option<String>,
    ) -> Result<Self, BdpError> {
        let endpoints = Endpoints::new(
            &cfg.base_url,
            &cfg.provenance_name,
            &cfg.provenance_version,
        )?;
        let provenance = Provenance::from(cfg);
        let session = match provenance_id {
            Some(id) => ProvenanceRegistrar::registered(provenance, id),
            None => ProvenanceRegistrar::new(provenance),
        };
        Ok(Self {
            origin: cfg.origin.clone(),
            session,
            wire: Wire {
                endpoints,
                transport,
                tokens,
            },
        })
    }

    /// Registration state of this session.
    #[must_use]
    pub fn provenance_state(&self) -> ProvenanceState {
        self.session.state()
    }

    async fn provenance_id(&self) -> Result<&str, BdpError> {
        self.session.ensure_registered(&self.wire).await
    }
}

#[async_trait]
impl BdpWriter for BdpClient {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "bdp::client",
            skip(self, data_types),
            fields(count = data_types.len()),
        )
    )]
    async fn sync_data_types(
        &self,
        station_type: &str,
        data_types: &[DataType],
    ) -> Result<(), BdpError> {
        self.provenance_id().await?;
        #[cfg(feature = "tracing")]
        tracing::debug!("syncing data types");
        let url = self.wire.endpoints.sync_data_types(station_type)?;
        self.wire.post(url, data_types).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!("syncing data types done");
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "bdp::client",
            skip(self, stations),
            fields(count = stations.len()),
        )
    )]
    async fn sync_stations(
        &self,
        station_type: &str,
        stations: &[Station],
        sync_state: bool,
        only_activate: bool,
    ) -> Result<(), BdpError> {
        self.provenance_id().await?;
        #[cfg(feature = "tracing")]
        if StationSyncMode::is_ignored_combination(sync_state, only_activate) {
            tracing::warn!("only_activate is ignored without sync_state; syncing as plain upsert");
        }
        let mode = StationSyncMode::from_flags(sync_state, only_activate);
        #[cfg(feature = "tracing")]
        tracing::info!(?mode, "syncing {} {station_type} stations", stations.len());
        let url = self.wire.endpoints.sync_stations(station_type, mode)?;
        self.wire.post(url, stations).await?;
        #[cfg(feature = "tracing")]
        tracing::info!("syncing stations done");
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "bdp::client",
            skip(self, data_map),
            fields(records = data_map.record_count()),
        )
    )]
    async fn push_data(&self, station_type: &str, mut data_map: DataMap) -> Result<(), BdpError> {
        let id = self.provenance_id().await?;
        if data_map.provenance().is_empty() {
            data_map.set_provenance(id);
        }
        #[cfg(feature = "tracing")]
        tracing::info!("pushing records");
        let url = self.wire.endpoints.push_records(station_type)?;
        self.wire.post(url, &data_map).await?;
        #[cfg(feature = "tracing")]
        tracing::info!("pushing records done");
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "bdp::client", skip_all, fields(count = events.len()))
    )]
    async fn push_events(&self, mut events: Vec<Event>) -> Result<(), BdpError> {
        let id = self.provenance_id().await?;
        for event in &mut events {
            event.provenance = id.to_string();
        }
        #[cfg(feature = "tracing")]
        tracing::info!("syncing {} events", events.len());
        let url = self.wire.endpoints.events()?;
        self.wire.post(url, &events).await?;
        #[cfg(feature = "tracing")]
        tracing::info!("syncing events done");
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "bdp::client", skip(self))
    )]
    async fn query_stations(
        &self,
        station_type: &str,
        origin: &str,
    ) -> Result<Vec<Station>, BdpError> {
        let url = self.wire.endpoints.stations(station_type, origin)?;
        let body = logged(self.wire.send(Method::Get, url, None).await?.accept_ok())?;
        serde_json::from_str(&body)
            .map_err(|e| BdpError::Decoding(format!("station list: {e}")))
    }

    fn create_data_map(&self) -> DataMap {
        DataMap::new(self.session.identifier().unwrap_or_default())
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}
