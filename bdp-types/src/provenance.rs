use serde::{Deserialize, Serialize};

/// Identifies the collector, version and lineage that produced a batch of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Lineage tag; the collector's origin.
    pub lineage: String,
    /// Collector name.
    pub data_collector: String,
    /// Collector version.
    pub data_collector_version: String,
}

impl Provenance {
    /// Build a provenance descriptor.
    pub fn new(
        lineage: impl Into<String>,
        data_collector: impl Into<String>,
        data_collector_version: impl Into<String>,
    ) -> Self {
        Self {
            lineage: lineage.into(),
            data_collector: data_collector.into(),
            data_collector_version: data_collector_version.into(),
        }
    }
}

impl From<&crate::BdpConfig> for Provenance {
    fn from(cfg: &crate::BdpConfig) -> Self {
        Self::new(
            cfg.origin.clone(),
            cfg.provenance_name.clone(),
            cfg.provenance_version.clone(),
        )
    }
}
