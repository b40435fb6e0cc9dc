//! bdp-core
//!
//! Contracts and session state shared by the bdp client crates.
//!
//! - `writer`: the `BdpWriter` trait implemented by the live client and the mock.
//! - `transport`: the HTTP and bearer-token seams.
//! - `provenance`: the memoized, single-flight provenance registrar.
//! - `station_sync`: reconciliation modes of a station sync.
//!
//! Domain types from `bdp-types` are re-exported at the crate root.
#![warn(missing_docs)]

/// Memoized provenance registration.
pub mod provenance;
/// Reconciliation modes of a station sync.
pub mod station_sync;
/// Transport and token seams.
pub mod transport;
mod writer;

pub use provenance::{ProvenanceRegistrar, ProvenanceState, RegisterProvenance};
pub use station_sync::StationSyncMode;
pub use transport::{
    Method, StaticToken, TokenProvider, Transport, TransportRequest, TransportResponse,
};
pub use writer::BdpWriter;

pub use bdp_types::*;
