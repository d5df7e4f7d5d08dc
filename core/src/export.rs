//! Save API exports to local files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::client::EmployeeClient;
use crate::error::RequestFailure;
use crate::transport::Transport;

pub const CSV_FILE_NAME: &str = "employees.csv";
pub const JSON_FILE_NAME: &str = "employees.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export request failed: {0}")]
    Request(#[from] RequestFailure),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolve `target` to a file path: a directory gets `default_name` appended.
pub fn resolve_target(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

/// Write the CSV bytes unchanged.
pub fn write_csv(target: &Path, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let path = resolve_target(target, CSV_FILE_NAME);
    write_file(&path, bytes)?;
    Ok(path)
}

/// Write `value` as pretty-printed JSON (two-space indent).
pub fn write_json(target: &Path, value: &Value) -> Result<PathBuf, ExportError> {
    let path = resolve_target(target, JSON_FILE_NAME);
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    write_file(&path, text.as_bytes())?;
    Ok(path)
}

/// Fetch the CSV export and save it under `target`.
pub fn export_csv<T: Transport>(client: &EmployeeClient<T>, target: &Path) -> Result<PathBuf, ExportError> {
    let bytes = client.export_csv()?;
    write_csv(target, &bytes)
}

/// Fetch the JSON export and save it under `target`.
pub fn export_json<T: Transport>(client: &EmployeeClient<T>, target: &Path) -> Result<PathBuf, ExportError> {
    let value = client.export_json()?;
    write_json(target, &value)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}
