//! File I/O utilities with atomic writes

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::FinTrackError;
use crate::models::Records;

/// Read a record list, tolerating the malformed shapes a list endpoint can return
///
/// A missing file, an empty file or `null` is an empty list; a bare object
/// is a one-element list.
pub fn read_records<T, P>(path: P) -> Result<Records<T>, FinTrackError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Records::default());
    }

    let body = fs::read_to_string(path)
        .map_err(|e| FinTrackError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    if body.trim().is_empty() {
        return Ok(Records::default());
    }

    let value: Value = serde_json::from_str(&body)
        .map_err(|e| FinTrackError::Storage(format!("Failed to parse {}: {}", path.display(), e)))?;

    if !value.is_array() {
        warn!(path = %path.display(), "record file is not a list; coercing");
    }

    Records::from_value(value)
        .map_err(|e| FinTrackError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinTrackError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinTrackError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must be on the same filesystem for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinTrackError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinTrackError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinTrackError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinTrackError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinTrackError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
