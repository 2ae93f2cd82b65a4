/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::TranspileConfig;

pub const CONFIG_FILE: &str = "transpile.toml";

/// Walk upward from `start` to find `transpile.toml`, like Cargo.toml discovery.
/// `Ok(None)` means no directory on the way up has one.
pub fn find_config(start: &Path) -> Result<Option<PathBuf>> {
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

pub fn load_config(path: &Path) -> Result<TranspileConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  parse_config(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<TranspileConfig> {
  let config: TranspileConfig = toml::from_str(content)?;
  config.validate()?;
  Ok(config)
}

/// Resolve the project root and its config.
/// An explicit path must exist; otherwise search upward and fall back to defaults rooted at `cwd`.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<(PathBuf, TranspileConfig)> {
  if let Some(path) = explicit {
    let config = load_config(path)?;
    // Relative paths are resolved against cwd so the root is always absolute.
    let base_dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
      _ => cwd.to_path_buf(),
    };
    return Ok((base_dir, config));
  }
  match find_config(cwd)? {
    Some(path) => {
      let config = load_config(&path)?;
      let base_dir = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
      Ok((base_dir, config))
    }
    None => Ok((cwd.to_path_buf(), TranspileConfig::default())),
  }
}
