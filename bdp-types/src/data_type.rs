use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// A measured quantity in the remote catalog (e.g. "air-temperature").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataType {
    /// Unique name within the catalog.
    pub name: String,
    /// Unit of measurement.
    #[serde(default)]
    pub unit: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Record type tag, e.g. "Mean" or "Instantaneous".
    #[serde(default)]
    pub rtype: String,
    /// Default period in seconds.
    #[serde(default)]
    pub period: u32,
    /// Free-form metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta_data: BTreeMap<String, String>,
}

impl DataType {
    /// Create a data type with no period and no metadata.
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        rtype: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            description: description.into(),
            rtype: rtype.into(),
            period: 0,
            meta_data: BTreeMap::new(),
        }
    }

    /// Set the default period in seconds.
    #[must_use]
    pub const fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Add one metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta_data.insert(key.into(), value.into());
        self
    }
}
