use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::schema::Config;

/// Write a starter config file with the default weights and thresholds.
///
/// Refuses to overwrite an existing file unless `force` is set. Parent
/// directories are created as needed. Returns the path written.
pub fn write_default_config(path: &Path, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .context("Failed to serialize default config")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(path.to_path_buf())
}
