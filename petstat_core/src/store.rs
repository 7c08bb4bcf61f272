//! Loading and writing persisted record sets.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};

/// Load a persisted record set. The file must hold a UTF-8 JSON object.
pub fn load_record_set(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    match serde_json::from_str(&content).map_err(|e| Error::json(path, e))? {
        Value::Object(map) => {
            info!("Loaded {} records from {}", map.len(), path.display());
            Ok(map)
        }
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Write `value` as pretty JSON with non-ASCII text kept literal.
///
/// The file is written in place; a failure part way can leave it truncated.
pub fn write_record_set<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    std::fs::write(path, json).map_err(|e| Error::io(path, e))
}
