use crate::error::{Error, Result};
use crate::models::Manifest;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Load a course-code to title table.
///
/// The format follows the extension: `.json`, `.toml`, `.yaml` or `.yml`.
/// Each format holds a flat map, e.g. `MH1100 = "Calculus I"` in TOML.
pub fn load_name_table(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let table: HashMap<String, String> = match extension.as_str() {
        "json" => serde_json::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        _ => {
            return Err(Error::UnsupportedFormat(format!(
                "name table {} (expected .json, .toml, .yaml or .yml)",
                path.display()
            )))
        }
    };

    Ok(table)
}

/// Read a previously generated manifest
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
