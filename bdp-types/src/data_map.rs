//! Hierarchical aggregation of records before a push.
//!
//! A [`DataMap`] is a three-level tree: the root holds one [`StationBranch`]
//! per station code, each branch holds one leaf per data-type code, and each
//! leaf holds the records in insertion order. Depths are distinct types, so a
//! node can never carry records and branches at the same time.
//!
//! On the wire every level is encoded as the same node object:
//!
//! ```json
//! { "name": "(default)", "data": [..] | null, "branch": {..} | null, "provenance": "" }
//! ```

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Record;

/// Display name the writer expects on every node.
pub const DEFAULT_NODE_NAME: &str = "(default)";

/// Root of the station → data type → records tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMap {
    name: String,
    provenance: String,
    stations: BTreeMap<String, StationBranch>,
}

/// Interior node grouping the leaves of one station.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationBranch {
    data_types: BTreeMap<String, Vec<Record>>,
}

impl Default for DataMap {
    fn default() -> Self {
        Self::new("")
    }
}

impl DataMap {
    /// Create an empty map stamped with `provenance` (may be empty until the
    /// session has registered).
    pub fn new(provenance: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_NODE_NAME.to_string(),
            provenance: provenance.into(),
            stations: BTreeMap::new(),
        }
    }

    /// Node display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provenance identifier carried by the root.
    #[must_use]
    pub fn provenance(&self) -> &str {
        &self.provenance
    }

    /// Overwrite the provenance identifier.
    pub fn set_provenance(&mut self, provenance: impl Into<String>) {
        self.provenance = provenance.into();
    }

    /// Append `record` to the leaf at (`station_code`, `data_type`), creating
    /// the station branch and the leaf if absent.
    pub fn add_record(&mut self, station_code: &str, data_type: &str, record: Record) {
        self.leaf_mut(station_code, data_type).push(record);
    }

    /// Append all `records` in iteration order; same as calling
    /// [`add_record`](Self::add_record) once per record.
    pub fn add_records<I>(&mut self, station_code: &str, data_type: &str, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return;
        }
        self.leaf_mut(station_code, data_type).extend(records);
    }

    fn leaf_mut(&mut self, station_code: &str, data_type: &str) -> &mut Vec<Record> {
        #[cfg(feature = "tracing")]
        if station_code.is_empty() || data_type.is_empty() {
            tracing::debug!(
                station = station_code,
                data_type,
                "empty station or data type code; the writer rejects these"
            );
        }
        let branch = self
            .stations
            .entry(station_code.to_string())
            .or_insert_with(|| {
                #[cfg(feature = "tracing")]
                tracing::debug!(station = station_code, "new station in branch");
                StationBranch::default()
            });
        branch.data_types.entry(data_type.to_string()).or_default()
    }

    /// Branch for `station_code`, if any record was added for it.
    #[must_use]
    pub fn station(&self, station_code: &str) -> Option<&StationBranch> {
        self.stations.get(station_code)
    }

    /// Station branches in key order.
    pub fn stations(&self) -> impl Iterator<Item = (&str, &StationBranch)> {
        self.stations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records of one leaf in insertion order.
    #[must_use]
    pub fn records(&self, station_code: &str, data_type: &str) -> Option<&[Record]> {
        self.station(station_code)?.records(data_type)
    }

    /// True when no station branch exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Total number of records across all leaves.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.stations.values().map(StationBranch::record_count).sum()
    }
}

impl StationBranch {
    /// Records for `data_type` in insertion order.
    #[must_use]
    pub fn records(&self, data_type: &str) -> Option<&[Record]> {
        self.data_types.get(data_type).map(Vec::as_slice)
    }

    /// Leaves in key order.
    pub fn data_types(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.data_types
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data_types.len()
    }

    /// True when the branch has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_types.is_empty()
    }

    fn record_count(&self) -> usize {
        self.data_types.values().map(Vec::len).sum()
    }
}

// ---- wire encoding ----

struct Leaf<'a>(&'a [Record]);

struct Leaves<'a>(&'a BTreeMap<String, Vec<Record>>);

impl Serialize for Leaf<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("DataMap", 4)?;
        node.serialize_field("name", DEFAULT_NODE_NAME)?;
        node.serialize_field("data", self.0)?;
        node.serialize_field("branch", &None::<()>)?;
        node.serialize_field("provenance", "")?;
        node.end()
    }
}

impl Serialize for Leaves<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, records) in self.0 {
            map.serialize_entry(code, &Leaf(records))?;
        }
        map.end()
    }
}

impl Serialize for StationBranch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("DataMap", 4)?;
        node.serialize_field("name", DEFAULT_NODE_NAME)?;
        node.serialize_field("data", &None::<()>)?;
        node.serialize_field("branch", &Leaves(&self.data_types))?;
        node.serialize_field("provenance", "")?;
        node.end()
    }
}

impl Serialize for DataMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("DataMap", 4)?;
        node.serialize_field("name", &self.name)?;
        node.serialize_field("data", &None::<()>)?;
        node.serialize_field("branch", &self.stations)?;
        node.serialize_field("provenance", &self.provenance)?;
        node.end()
    }
}

#[derive(Deserialize)]
struct WireNode {
    #[serde(default)]
    name: String,
    #[serde(default)]
    data: Option<Vec<Record>>,
    #[serde(default)]
    branch: Option<BTreeMap<String, WireNode>>,
    #[serde(default)]
    provenance: String,
}

impl From<WireNode> for StationBranch {
    fn from(node: WireNode) -> Self {
        let data_types = node
            .branch
            .unwrap_or_default()
            .into_iter()
            .map(|(code, leaf)| (code, leaf.data.unwrap_or_default()))
            .collect();
        Self { data_types }
    }
}

impl<'de> Deserialize<'de> for DataMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let root = WireNode::deserialize(deserializer)?;
        let stations = root
            .branch
            .unwrap_or_default()
            .into_iter()
            .map(|(code, node)| (code, StationBranch::from(node)))
            .collect();
        Ok(Self {
            name: if root.name.is_empty() {
                DEFAULT_NODE_NAME.to_string()
            } else {
                root.name
            },
            provenance: root.provenance,
            stations,
        })
    }
}
