//! Recording test double for [`BdpWriter`].
//!
//! [`BdpMock`] accepts every call without touching the network and records
//! it, so collector tests can assert on exactly what would have been sent:
//!
//! ```rust,ignore
//! let mock = BdpMock::new("my-origin").with_provenance_id("prov-1");
//! run_collector(&mock).await?;
//! let expected: MockCalls = io::load_output("tests/fixtures/expected.json")?;
//! assert_calls_eq(&expected, &mock.requests());
//! ```
#![warn(missing_docs)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bdp_core::{BdpConfig, BdpError, BdpWriter, DataMap, DataType, Event, Station};

mod calls;
/// JSON fixture helpers.
pub mod io;

pub use calls::{CallKind, CallMismatch, MockCalls, StationSyncCall, assert_calls_eq};

#[derive(Default)]
struct State {
    calls: MockCalls,
    fail_next: Option<BdpError>,
}

/// In-memory [`BdpWriter`] that records calls per station type.
///
/// Provenance is stamped like the live client does: pushed data maps get the
/// configured id only when theirs is empty, events always get it.
pub struct BdpMock {
    origin: String,
    provenance_id: String,
    state: Mutex<State>,
}

impl BdpMock {
    /// Create a mock reporting `origin` and an empty provenance id.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            provenance_id: String::new(),
            state: Mutex::new(State::default()),
        }
    }

    /// Create a mock with the origin of `cfg`.
    #[must_use]
    pub fn from_config(cfg: &BdpConfig) -> Self {
        Self::new(cfg.origin.clone())
    }

    /// Provenance id stamped into data maps and events.
    #[must_use]
    pub fn with_provenance_id(mut self, id: impl Into<String>) -> Self {
        self.provenance_id = id.into();
        self
    }

    /// Snapshot of all calls recorded so far.
    pub fn requests(&self) -> MockCalls {
        self.lock().calls.clone()
    }

    /// Make the next write or query fail with `err`. The failing call is not
    /// recorded.
    pub fn fail_next(&self, err: BdpError) {
        self.lock().fail_next = Some(err);
    }

    /// Drop all recorded calls and any pending failure.
    pub fn reset(&self) {
        *self.lock() = State::default();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, f: impl FnOnce(&mut MockCalls)) -> Result<(), BdpError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        f(&mut state.calls);
        Ok(())
    }
}

#[async_trait]
impl BdpWriter for BdpMock {
    async fn sync_data_types(
        &self,
        station_type: &str,
        data_types: &[DataType],
    ) -> Result<(), BdpError> {
        self.record(|calls| {
            calls
                .synced_data_types
                .entry(station_type.to_string())
                .or_default()
                .push(data_types.to_vec());
        })
    }

    async fn sync_stations(
        &self,
        station_type: &str,
        stations: &[Station],
        sync_state: bool,
        only_activate: bool,
    ) -> Result<(), BdpError> {
        self.record(|calls| {
            calls
                .synced_stations
                .entry(station_type.to_string())
                .or_default()
                .push(StationSyncCall {
                    stations: stations.to_vec(),
                    sync_state,
                    only_activate,
                });
        })
    }

    async fn push_data(&self, station_type: &str, mut data_map: DataMap) -> Result<(), BdpError> {
        if data_map.provenance().is_empty() {
            data_map.set_provenance(self.provenance_id.as_str());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            station_type,
            records = data_map.record_count(),
            "mock recorded data push"
        );
        self.record(|calls| {
            calls
                .synced_data
                .entry(station_type.to_string())
                .or_default()
                .push(data_map);
        })
    }

    async fn push_events(&self, mut events: Vec<Event>) -> Result<(), BdpError> {
        for event in &mut events {
            event.provenance.clone_from(&self.provenance_id);
        }
        self.record(|calls| calls.pushed_events.push(events))
    }

    async fn query_stations(
        &self,
        station_type: &str,
        origin: &str,
    ) -> Result<Vec<Station>, BdpError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        let stations = state
            .calls
            .synced_stations
            .get(station_type)
            .and_then(|syncs| syncs.last())
            .map(|last| {
                last.stations
                    .iter()
                    .filter(|s| s.origin == origin)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(stations)
    }

    fn create_data_map(&self) -> DataMap {
        DataMap::new(self.provenance_id.as_str())
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}
