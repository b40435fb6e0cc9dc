use async_trait::async_trait;

use crate::{BdpError, DataMap, DataType, Event, Station};

/// The writer contract shared by the live client and the test double.
///
/// Data-bearing operations register the session's provenance on first use
/// and stamp its identifier into what they transmit.
#[async_trait]
pub trait BdpWriter: Send + Sync {
    /// Upsert the data-type catalog of a station-type scope.
    async fn sync_data_types(
        &self,
        station_type: &str,
        data_types: &[DataType],
    ) -> Result<(), BdpError>;

    /// Submit the stations of a scope.
    ///
    /// If `sync_state` is true, the writer's state is synced with `stations`.
    /// `only_activate` is only considered if `sync_state` is true: when set,
    /// all given stations are inserted or activated and nothing is
    /// deactivated; when unset, all given stations are activated and every
    /// other station of the scope is deactivated.
    async fn sync_stations(
        &self,
        station_type: &str,
        stations: &[Station],
        sync_state: bool,
        only_activate: bool,
    ) -> Result<(), BdpError>;

    /// Push one data map. The session provenance is stamped into the root if
    /// the caller left it empty.
    async fn push_data(&self, station_type: &str, data_map: DataMap) -> Result<(), BdpError>;

    /// Push events; every event's provenance is overwritten with the session's.
    async fn push_events(&self, events: Vec<Event>) -> Result<(), BdpError>;

    /// Stations of a scope from one origin.
    async fn query_stations(
        &self,
        station_type: &str,
        origin: &str,
    ) -> Result<Vec<Station>, BdpError>;

    /// Empty data map stamped with the current (possibly still empty) provenance id.
    fn create_data_map(&self) -> DataMap;

    /// Origin tag of this collector.
    fn origin(&self) -> &str;
}
