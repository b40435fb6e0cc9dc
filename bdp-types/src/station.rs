//! Station metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_util::null_as_default;

/// A measuring location (sensor, parking lot, weather station, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Identifier, unique within a station-type scope.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Station type scope; omitted on the wire when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub station_type: String,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Origin tag of the data provider.
    pub origin: String,
    /// Identifier of the parent station, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_station: Option<String>,
    /// Open-ended metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta_data: BTreeMap<String, Value>,
}

impl Station {
    /// Create a station without parent and metadata.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        station_type: impl Into<String>,
        latitude: f64,
        longitude: f64,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            station_type: station_type.into(),
            latitude,
            longitude,
            origin: origin.into(),
            parent_station: None,
            meta_data: BTreeMap::new(),
        }
    }

    /// Set the parent station identifier.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_station = Some(parent.into());
        self
    }

    /// Add one metadata entry, replacing an existing value for `key`.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta_data.insert(key.into(), value.into());
        self
    }
}
