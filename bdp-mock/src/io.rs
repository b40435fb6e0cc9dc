//! JSON fixture files for collector tests.
//!
//! Typical flow: load the raw provider payload with [`load_input`], run the
//! collector against a [`BdpMock`](crate::BdpMock), then compare
//! `requests()` with a snapshot read by [`load_output`]. [`write_output`]
//! regenerates that snapshot.

use std::path::Path;

use bdp_core::BdpError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and decode a provider payload fixture.
///
/// # Errors
/// `BdpError::Io` if the file cannot be read, `BdpError::Decoding` if its
/// content does not decode into `T`.
pub fn load_input<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, BdpError> {
    read_json(path.as_ref())
}

/// Read and decode an expected-output snapshot.
///
/// # Errors
/// Same as [`load_input`].
pub fn load_output<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, BdpError> {
    read_json(path.as_ref())
}

/// Encode `value` as pretty-printed JSON and write it to `path`, replacing
/// any existing file.
///
/// # Errors
/// `BdpError::Encoding` if `value` cannot be serialized, `BdpError::Io` if
/// the file cannot be written.
pub fn write_output<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<(), BdpError> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| BdpError::Encoding(e.to_string()))?;
    std::fs::write(path, bytes)
        .map_err(|e| BdpError::Io(format!("cannot write {}: {e}", path.display())))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, BdpError> {
    let bytes = std::fs::read(path)
        .map_err(|e| BdpError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| BdpError::Decoding(format!("{}: {e}", path.display())))
}
