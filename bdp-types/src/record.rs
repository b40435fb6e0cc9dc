//! Single observations and their value kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Value kinds accepted by the writer.
///
/// Serialized untagged: the wire only ever sees the bare value. Numbers keep
/// their JSON representation, so integers stay exact and are not re-encoded
/// as floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// Numeric measurement, integer or float.
    Number(Number),
    /// Textual measurement.
    Text(String),
    /// Structured payload forwarded as opaque JSON.
    Json(Value),
}

impl RecordValue {
    /// Numeric value as a float, if this is a `Number`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Numeric value as a signed integer, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Text value, if this is a `Text`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for RecordValue {
    // NaN and infinities have no JSON form; serde_json writes them as null.
    fn from(v: f64) -> Self {
        Number::from_f64(v).map_or(Self::Json(Value::Null), Self::Number)
    }
}

impl From<f32> for RecordValue {
    fn from(v: f32) -> Self {
        Self::from(f64::from(v))
    }
}

impl From<i32> for RecordValue {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl From<i64> for RecordValue {
    fn from(v: i64) -> Self {
        Self::Number(v.into())
    }
}

impl From<u64> for RecordValue {
    fn from(v: u64) -> Self {
        Self::Number(v.into())
    }
}

impl From<&str> for RecordValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Value> for RecordValue {
    // Mirror untagged deserialization so values compare equal after a round trip.
    fn from(v: Value) -> Self {
        match v {
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }
}

/// One observation. Records have no identity beyond their position in a
/// data map leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Observed value.
    pub value: RecordValue,
    /// Measurement period in seconds.
    pub period: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Record {
    /// Create a record from an epoch-millisecond timestamp.
    pub fn new(timestamp: i64, value: impl Into<RecordValue>, period: u64) -> Self {
        Self {
            value: value.into(),
            period,
            timestamp,
        }
    }

    /// Create a record timestamped at `at`.
    pub fn at(at: DateTime<Utc>, value: impl Into<RecordValue>, period: u64) -> Self {
        Self::new(at.timestamp_millis(), value, period)
    }
}
