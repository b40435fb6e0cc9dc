//! Client configuration shared by the live client and the test double.

use serde::{Deserialize, Serialize};

use crate::BdpError;

/// Environment variable holding the writer base URL (without the `/json` suffix).
pub const ENV_BASE_URL: &str = "BDP_BASE_URL";
/// Environment variable holding the data collector name.
pub const ENV_PROVENANCE_NAME: &str = "BDP_PROVENANCE_NAME";
/// Environment variable holding the data collector version.
pub const ENV_PROVENANCE_VERSION: &str = "BDP_PROVENANCE_VERSION";
/// Environment variable holding the origin tag.
pub const ENV_ORIGIN: &str = "BDP_ORIGIN";

/// Connection and provenance settings for a writer session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BdpConfig {
    /// Fully qualified writer endpoint, including the `/json` suffix.
    pub base_url: String,
    /// Data collector name, sent as `prn` and used as provenance collector.
    pub provenance_name: String,
    /// Data collector version, sent as `prv`.
    pub provenance_version: String,
    /// Origin tag of this collector; also used as provenance lineage.
    pub origin: String,
}

impl BdpConfig {
    /// Build a configuration; `base_url` is used verbatim.
    pub fn new(
        base_url: impl Into<String>,
        provenance_name: impl Into<String>,
        provenance_version: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            provenance_name: provenance_name.into(),
            provenance_version: provenance_version.into(),
            origin: origin.into(),
        }
    }

    /// Read the configuration from the `BDP_*` environment variables.
    ///
    /// `BDP_BASE_URL` gets the `/json` suffix appended, as the writer serves
    /// its JSON API under that prefix.
    ///
    /// # Errors
    /// Returns `BdpError::Config` naming the first missing variable.
    pub fn from_env() -> Result<Self, BdpError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an injectable lookup.
    ///
    /// # Errors
    /// Returns `BdpError::Config` naming the first missing variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BdpError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| BdpError::config(format!("{key} is not set")))
        };
        let base = require(ENV_BASE_URL)?;
        Ok(Self {
            base_url: format!("{}/json", base.trim_end_matches('/')),
            provenance_name: require(ENV_PROVENANCE_NAME)?,
            provenance_version: require(ENV_PROVENANCE_VERSION)?,
            origin: require(ENV_ORIGIN)?,
        })
    }
}
