use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::domain::ResultBundle;

pub const DEFAULT_BUNDLE_NAME: &str = "players.json";

/// Write the result bundle as pretty JSON under the output directory
pub fn write_bundle(out_dir: &Path, name: &str, bundle: &ResultBundle) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).context("Failed to create output directory")?;

    let path = out_dir.join(name);
    let json = serde_json::to_string_pretty(bundle).context("Failed to serialize bundle")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote bundle to {}", path.display());
    Ok(path)
}
