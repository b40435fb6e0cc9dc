//! Domain types, the hierarchical data map, configuration and the error type
//! shared by the bdp client crates.
#![warn(missing_docs)]

mod config;
mod data_map;
mod data_type;
mod error;
mod event;
mod provenance;
mod record;
mod serde_util;
mod station;

pub use config::{BdpConfig, ENV_BASE_URL, ENV_ORIGIN, ENV_PROVENANCE_NAME, ENV_PROVENANCE_VERSION};
pub use data_map::{DEFAULT_NODE_NAME, DataMap, StationBranch};
pub use data_type::DataType;
pub use error::BdpError;
pub use event::Event;
pub use provenance::Provenance;
pub use record::{Record, RecordValue};
pub use station::Station;
