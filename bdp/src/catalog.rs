//! Bulk data-type catalogs loaded from JSON files.

use std::path::Path;

use bdp_core::{BdpError, DataType};

/// An in-memory data-type catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTypeList {
    types: Vec<DataType>,
}

impl DataTypeList {
    /// Wrap an existing list.
    #[must_use]
    pub const fn new(types: Vec<DataType>) -> Self {
        Self { types }
    }

    /// Load a catalog from a JSON array of data types.
    ///
    /// # Errors
    /// Returns `BdpError::Io` if the file cannot be read and
    /// `BdpError::Decoding` if it is not a valid data-type array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BdpError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BdpError::Io(format!("cannot read {}: {e}", path.display())))?;
        let types = serde_json::from_str(&text)
            .map_err(|e| BdpError::Decoding(format!("{}: {e}", path.display())))?;
        Ok(Self { types })
    }

    /// All data types in file order.
    #[must_use]
    pub fn all(&self) -> &[DataType] {
        &self.types
    }

    /// Look up a data type by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&DataType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Number of data types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl From<Vec<DataType>> for DataTypeList {
    fn from(types: Vec<DataType>) -> Self {
        Self::new(types)
    }
}
