// lazykeg-aio/src/json_io.rs
use std::path::Path;

use lazykeg_common::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::fs::{atomic_write_file, DATA_MODE};

/// Writes serializable data to a JSON file (pretty-printed), atomically.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    debug!("Writing JSON to: {}", path.display());
    let json_bytes = serde_json::to_vec_pretty(data)?;
    atomic_write_file(path, &json_bytes, DATA_MODE)
}

/// Reads and deserializes data from a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading JSON from: {}", path.display());
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
