/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::FolioConfig;

pub const CONFIG_FILE: &str = "folio.toml";

/// Walk upward from `start` to find `folio.toml`, like Cargo.toml discovery.
/// `Ok(None)` when no ancestor has one.
pub fn locate_folio_config(start: &Path) -> Result<Option<PathBuf>> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(Some(candidate));
    }
    if !dir.pop() {
      return Ok(None);
    }
  }
}


pub fn load_folio_config(path: &Path) -> Result<FolioConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: FolioConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate()?;
  Ok(config)
}
