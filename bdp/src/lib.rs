//! Client for the Open Data Hub timeseries writer.
//!
//! Overview
//! - Registers the collector's provenance once per session and stamps its
//!   identifier into everything that is pushed.
//! - Syncs data-type catalogs and station lists per station type, with
//!   optional reconciliation of active stations.
//! - Pushes records aggregated in a [`DataMap`] and events.
//! - Queries the stations of a scope.
//!
//! Every operation is one request; there is no retry, rate limiting or
//! buffering. Callers own batching and retry policy.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use bdp::{BdpClient, BdpWriter, Record, StaticToken};
//!
//! let client = BdpClient::from_env(Arc::new(StaticToken::new(token)))?;
//!
//! let mut map = client.create_data_map();
//! map.add_record("ST1", "air-temperature", Record::new(ts_ms, 21.5, 600));
//! client.push_data("WeatherStation", map).await?;
//! ```
//!
//! For tests, `bdp-mock` provides a recording implementation of [`BdpWriter`].
#![warn(missing_docs)]

mod builder;
mod catalog;
mod client;
mod endpoints;
mod http;

pub use builder::BdpClientBuilder;
pub use catalog::DataTypeList;
pub use client::BdpClient;
pub use http::ReqwestTransport;

// Re-export core types for convenience
pub use bdp_core::{
    BdpConfig, BdpError, BdpWriter, DEFAULT_NODE_NAME, DataMap, DataType, Event, Method,
    Provenance, ProvenanceState, Record, RecordValue, StaticToken, Station, StationBranch,
    StationSyncMode, TokenProvider, Transport, TransportRequest, TransportResponse,
};
