/* src/cli/core/src/fs.rs */

// Filesystem access used by the build. Everything goes through the `Fs` trait
// so tests can count reads and copies.

use std::path::Path;

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

/// `*` and `?` stay inside one path segment; `**/` spans directories.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

pub trait Fs: Send + Sync {
  fn read(&self, path: &Path) -> Result<String>;
  /// Write `contents`, creating parent directories as needed.
  fn write(&self, path: &Path, contents: &str) -> Result<()>;
  fn copy(&self, from: &Path, to: &Path) -> Result<()>;
  fn exists(&self, path: &Path) -> bool;
  /// Files under `root` matching `pattern`, as `/`-separated paths relative to `root`.
  fn expand(&self, root: &Path, pattern: &str) -> Result<Vec<String>>;
  /// Remove a directory tree. Returns false when there was nothing to remove.
  fn remove_dir_all(&self, path: &Path) -> Result<bool>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl Fs for DiskFs {
  fn read(&self, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
  }

  fn write(&self, path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
  }

  fn copy(&self, from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::copy(from, to)
      .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    Ok(())
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn expand(&self, root: &Path, pattern: &str) -> Result<Vec<String>> {
    if !root.is_dir() {
      return Ok(Vec::new());
    }
    let matcher =
      Pattern::new(pattern).with_context(|| format!("invalid glob pattern \"{pattern}\""))?;
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
      let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
      if !entry.file_type().is_file() {
        continue;
      }
      let Ok(rel) = entry.path().strip_prefix(root) else { continue };
      let rel = to_slash(rel);
      if matcher.matches_with(&rel, GLOB_OPTIONS) {
        files.push(rel);
      }
    }
    Ok(files)
  }

  fn remove_dir_all(&self, path: &Path) -> Result<bool> {
    if !path.exists() {
      return Ok(false);
    }
    std::fs::remove_dir_all(path).with_context(|| format!("failed to remove {}", path.display()))?;
    Ok(true)
  }
}

fn to_slash(path: &Path) -> String {
  path.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}
