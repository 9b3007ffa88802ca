use super::types::{CatalogSnapshot, ColumnDescriptor, KeyColumn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Catalog access failure. Fatal to the run: generation is deterministic,
/// so there is nothing to gain from retrying an unreachable catalog here.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog metadata unavailable: {0}")]
    MetadataUnavailable(String),
}

/// On-disk shape of a catalog snapshot file.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    primary_keys: BTreeMap<String, Vec<KeyColumn>>,
}

/// Load a catalog snapshot from a YAML or JSON file, chosen by extension.
///
/// # Errors
///
/// Returns [`CatalogError::MetadataUnavailable`] when the file cannot be
/// read or parsed.
pub fn load_catalog(path: &Path) -> Result<CatalogSnapshot, CatalogError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::MetadataUnavailable(format!("{}: {e}", path.display())))?;
    let is_yaml = path
        .extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    let file: CatalogFile = if is_yaml {
        serde_yaml::from_str(&content)
            .map_err(|e| CatalogError::MetadataUnavailable(format!("{}: {e}", path.display())))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| CatalogError::MetadataUnavailable(format!("{}: {e}", path.display())))?
    };
    tracing::debug!(
        columns = file.columns.len(),
        keys = file.primary_keys.len(),
        "loaded catalog snapshot"
    );
    Ok(CatalogSnapshot::new(file.columns, file.primary_keys))
}
