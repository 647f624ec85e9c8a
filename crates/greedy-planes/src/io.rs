//! Reading and writing structs from the crate to disk.

use serde::{de::DeserializeOwned, Serialize};

use crate::{Clustering, CostTable, PartitionState, SearchConfig};

/// Writes and reads structs to and from disk in binary format using `bitcode`.
pub trait DiskIO: Serialize + DeserializeOwned {
    /// Writes the struct to disk in binary format using `bitcode`.
    ///
    /// # Errors
    ///
    /// - If the struct cannot be encoded.
    /// - If the file cannot be written.
    fn write_to<P: AsRef<std::path::Path>>(&self, path: &P) -> Result<(), String> {
        let bytes = bitcode::serialize(self).map_err(|e| e.to_string())?;
        std::fs::write(path, bytes).map_err(|e| e.to_string())
    }

    /// Reads the struct from disk in binary format using `bitcode`.
    ///
    /// # Errors
    ///
    /// - If the file cannot be read.
    /// - If the struct cannot be decoded.
    fn read_from<P: AsRef<std::path::Path>>(path: &P) -> Result<Self, String> {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        bitcode::deserialize(&bytes).map_err(|e| e.to_string())
    }
}

impl DiskIO for CostTable {}
impl DiskIO for PartitionState {}
impl DiskIO for SearchConfig {}
impl DiskIO for Clustering {}
