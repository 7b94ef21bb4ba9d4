use crate::error::Result;
use crate::models::Manifest;
use std::fs;
use std::path::Path;
use tracing::info;

/// Replace the manifest at `path` with `manifest`.
///
/// The JSON goes to a sibling temp file first and is renamed over the
/// target, so readers never see a half-written manifest.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = manifest.to_json()?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;

    info!(
        "Wrote {} courses to {}",
        manifest.courses.len(),
        path.display()
    );
    Ok(())
}
