use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_util::null_as_default;

/// A time-bounded occurrence (road works, closures, cultural events, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event identifier (UUID text).
    pub uuid: String,
    /// Origin tag of the data provider.
    pub origin: String,
    /// Category label.
    pub category: String,
    /// Identifier of the series this event belongs to.
    pub event_series_uuid: String,
    /// Short name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Free-text location description.
    #[serde(default)]
    pub location_description: String,
    /// Geometry in WKT.
    #[serde(default)]
    pub wkt_geometry: String,
    /// Start time in epoch milliseconds (inclusive).
    #[serde(default)]
    pub event_start: i64,
    /// End time in epoch milliseconds (exclusive); `None` means open-ended.
    #[serde(default)]
    pub event_end: Option<i64>,
    /// Provenance identifier; stamped by the client before transmission.
    #[serde(default)]
    pub provenance: String,
    /// Open-ended metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta_data: BTreeMap<String, Value>,
}

impl Event {
    /// Create an open-ended event starting at the epoch.
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        event_series_uuid: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            origin: origin.into(),
            category: category.into(),
            event_series_uuid: event_series_uuid.into(),
            name: name.into(),
            description: String::new(),
            location_description: String::new(),
            wkt_geometry: String::new(),
            event_start: 0,
            event_end: None,
            provenance: String::new(),
            meta_data: BTreeMap::new(),
        }
    }

    /// Set the event interval; `end` is exclusive.
    #[must_use]
    pub fn with_interval(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.event_start = start.timestamp_millis();
        self.event_end = end.map(|e| e.timestamp_millis());
        self
    }

    /// Set the description texts.
    #[must_use]
    pub fn with_description(
        mut self,
        description: impl Into<String>,
        location_description: impl Into<String>,
    ) -> Self {
        self.description = description.into();
        self.location_description = location_description.into();
        self
    }

    /// Set the WKT geometry.
    #[must_use]
    pub fn with_geometry(mut self, wkt: impl Into<String>) -> Self {
        self.wkt_geometry = wkt.into();
        self
    }

    /// Add one metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta_data.insert(key.into(), value.into());
        self
    }

    /// True if the event has no end, or `at_ms` lies in `[start, end)`.
    #[must_use]
    pub fn is_active_at(&self, at_ms: i64) -> bool {
        at_ms >= self.event_start && self.event_end.is_none_or(|end| at_ms < end)
    }
}
