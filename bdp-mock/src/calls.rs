use std::collections::BTreeMap;
use std::fmt;

use bdp_core::{DataMap, DataType, Event, Station};
use serde::{Deserialize, Serialize};

/// One recorded `sync_stations` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSyncCall {
    /// Stations as passed by the caller.
    pub stations: Vec<Station>,
    /// `sync_state` flag as given.
    pub sync_state: bool,
    /// `only_activate` flag as given.
    pub only_activate: bool,
}

/// Snapshot of everything a [`BdpMock`](crate::BdpMock) has recorded.
///
/// Keyed collections are indexed by station type; each value lists the
/// calls in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockCalls {
    /// Data-type catalogs, one entry per `sync_data_types` call.
    #[serde(default)]
    pub synced_data_types: BTreeMap<String, Vec<Vec<DataType>>>,
    /// Station syncs.
    #[serde(default)]
    pub synced_stations: BTreeMap<String, Vec<StationSyncCall>>,
    /// Pushed data maps.
    #[serde(default)]
    pub synced_data: BTreeMap<String, Vec<DataMap>>,
    /// Event batches, one entry per `push_events` call.
    #[serde(default)]
    pub pushed_events: Vec<Vec<Event>>,
}

/// Which recorded collection a mismatch was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `synced_data_types`
    DataTypes,
    /// `synced_stations`
    Stations,
    /// `synced_data`
    Data,
    /// `pushed_events`
    Events,
}

impl CallKind {
    const fn label(self) -> &'static str {
        match self {
            Self::DataTypes => "data type sync",
            Self::Stations => "station sync",
            Self::Data => "data push",
            Self::Events => "event push",
        }
    }
}

/// A single difference between an expected and an actual snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallMismatch {
    /// The expected snapshot has calls for a station type the actual one lacks.
    MissingKey {
        /// Collection.
        kind: CallKind,
        /// Station type.
        key: String,
    },
    /// The actual snapshot has calls for a station type that was not expected.
    UnexpectedKey {
        /// Collection.
        kind: CallKind,
        /// Station type.
        key: String,
    },
    /// Both have the key but a different number of calls.
    CountDiffers {
        /// Collection.
        kind: CallKind,
        /// Station type; empty for events.
        key: String,
        /// Expected number of calls.
        expected: usize,
        /// Recorded number of calls.
        actual: usize,
    },
    /// The call at `index` differs.
    CallDiffers {
        /// Collection.
        kind: CallKind,
        /// Station type; empty for events.
        key: String,
        /// Position in call order.
        index: usize,
    },
}

impl fmt::Display for CallMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { kind, key } => {
                write!(f, "{}: expected calls for {key:?}, found none", kind.label())
            }
            Self::UnexpectedKey { kind, key } => {
                write!(f, "{}: unexpected calls for {key:?}", kind.label())
            }
            Self::CountDiffers {
                kind,
                key,
                expected,
                actual,
            } => write!(
                f,
                "{} {key:?}: expected {expected} calls, got {actual}",
                kind.label()
            ),
            Self::CallDiffers { kind, key, index } => {
                write!(f, "{} {key:?}: call #{index} differs", kind.label())
            }
        }
    }
}

impl MockCalls {
    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.synced_data_types.is_empty()
            && self.synced_stations.is_empty()
            && self.synced_data.is_empty()
            && self.pushed_events.is_empty()
    }

    /// Compare two snapshots.
    ///
    /// Station-type keys must match exactly and, per key, the calls must be
    /// equal element-wise in call order. An empty result means the snapshots
    /// are equal.
    #[must_use]
    pub fn diff(expected: &Self, actual: &Self) -> Vec<CallMismatch> {
        let mut out = Vec::new();
        diff_keyed(
            CallKind::DataTypes,
            &expected.synced_data_types,
            &actual.synced_data_types,
            &mut out,
        );
        diff_keyed(
            CallKind::Stations,
            &expected.synced_stations,
            &actual.synced_stations,
            &mut out,
        );
        diff_keyed(
            CallKind::Data,
            &expected.synced_data,
            &actual.synced_data,
            &mut out,
        );
        diff_seq(
            CallKind::Events,
            "",
            &expected.pushed_events,
            &actual.pushed_events,
            &mut out,
        );
        out
    }
}

fn diff_keyed<T: PartialEq>(
    kind: CallKind,
    expected: &BTreeMap<String, Vec<T>>,
    actual: &BTreeMap<String, Vec<T>>,
    out: &mut Vec<CallMismatch>,
) {
    for (key, want) in expected {
        match actual.get(key) {
            Some(got) => diff_seq(kind, key, want, got, out),
            None => out.push(CallMismatch::MissingKey {
                kind,
                key: key.clone(),
            }),
        }
    }
    for key in actual.keys().filter(|k| !expected.contains_key(*k)) {
        out.push(CallMismatch::UnexpectedKey {
            kind,
            key: key.clone(),
        });
    }
}

fn diff_seq<T: PartialEq>(
    kind: CallKind,
    key: &str,
    expected: &[T],
    actual: &[T],
    out: &mut Vec<CallMismatch>,
) {
    if expected.len() != actual.len() {
        out.push(CallMismatch::CountDiffers {
            kind,
            key: key.to_string(),
            expected: expected.len(),
            actual: actual.len(),
        });
        return;
    }
    for (index, (want, got)) in expected.iter().zip(actual).enumerate() {
        if want != got {
            out.push(CallMismatch::CallDiffers {
                kind,
                key: key.to_string(),
                index,
            });
        }
    }
}

/// Assert that two snapshots are equal.
///
/// # Panics
/// Panics listing every mismatch if the snapshots differ.
#[track_caller]
pub fn assert_calls_eq(expected: &MockCalls, actual: &MockCalls) {
    let mismatches = MockCalls::diff(expected, actual);
    if !mismatches.is_empty() {
        let listing: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
        panic!(
            "recorded calls differ from expectation:\n  {}",
            listing.join("\n  ")
        );
    }
}
