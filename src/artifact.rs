//! Shared helpers for reading artifacts from disk with path context.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Read and deserialize a JSON artifact.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Artifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| Error::Artifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Open a CSV reader with a header row, tolerating ragged rows.
pub(crate) fn csv_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Find a header index by name (case-insensitive).
pub(crate) fn find_header_index(headers: &[&str], name: &str) -> Option<usize> {
    let name_lower = name.to_lowercase();
    headers.iter().position(|h| h.to_lowercase() == name_lower)
}
