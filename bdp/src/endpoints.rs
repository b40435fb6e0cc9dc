//! URL construction for the writer's JSON API.
//!
//! Every request carries the collector name (`prn`) and version (`prv`) as
//! query parameters; path segments are percent-encoded by `url`.

use bdp_core::{BdpError, StationSyncMode};
use url::Url;

const SYNC_DATA_TYPES: &str = "syncDataTypes";
const SYNC_STATIONS: &str = "syncStations";
const PUSH_RECORDS: &str = "pushRecords";
const STATIONS: &str = "stations";
const PROVENANCE: &str = "provenance";
const EVENTS: &str = "event";

#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    base: Url,
    prn: String,
    prv: String,
}

impl Endpoints {
    pub(crate) fn new(base_url: &str, prn: &str, prv: &str) -> Result<Self, BdpError> {
        let base = Url::parse(base_url)
            .map_err(|e| BdpError::config(format!("invalid base url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(BdpError::config(format!(
                "base url {base_url:?} cannot carry a path"
            )));
        }
        Ok(Self {
            base,
            prn: prn.to_string(),
            prv: prv.to_string(),
        })
    }

    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, BdpError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| BdpError::config("base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("prn", &self.prn);
            pairs.append_pair("prv", &self.prv);
        }
        Ok(url)
    }

    pub(crate) fn provenance(&self) -> Result<Url, BdpError> {
        self.url(&[PROVENANCE], &[])
    }

    pub(crate) fn sync_data_types(&self, station_type: &str) -> Result<Url, BdpError> {
        self.url(&[SYNC_DATA_TYPES], &[("stationType", station_type)])
    }

    pub(crate) fn sync_stations(
        &self,
        station_type: &str,
        mode: StationSyncMode,
    ) -> Result<Url, BdpError> {
        let mut url = self.url(&[SYNC_STATIONS, station_type], &[])?;
        url.query_pairs_mut()
            .append_pair("syncState", bool_str(mode.sync_state()))
            .append_pair("onlyActivation", bool_str(mode.only_activation()));
        Ok(url)
    }

    pub(crate) fn push_records(&self, station_type: &str) -> Result<Url, BdpError> {
        self.url(&[PUSH_RECORDS, station_type], &[])
    }

    pub(crate) fn events(&self) -> Result<Url, BdpError> {
        self.url(&[EVENTS], &[])
    }

    pub(crate) fn stations(&self, station_type: &str, origin: &str) -> Result<Url, BdpError> {
        // trailing empty segment keeps the writer's `/stations/{type}/` form
        self.url(&[STATIONS, station_type, ""], &[("origin", origin)])
    }
}

const fn bool_str(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}
