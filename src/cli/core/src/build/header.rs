/* src/cli/core/src/build/header.rs */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;

use crate::fs::Fs;

/// Path value that selects an empty header without touching disk.
pub const NO_HEADER: &str = "none";

/// Header templates keyed by path. Each file is read at most once per cache;
/// entries are never invalidated.
#[derive(Debug, Default)]
pub struct HeaderCache {
  entries: Mutex<HashMap<PathBuf, Arc<str>>>,
}

impl HeaderCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, fs: &dyn Fs, path: &Path) -> Result<Arc<str>> {
    if path.as_os_str() == NO_HEADER {
      return Ok(Arc::from(""));
    }
    // Held across the read so concurrent jobs in one batch share a single load.
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(text) = entries.get(path) {
      return Ok(Arc::clone(text));
    }
    let text: Arc<str> = Arc::from(fs.read(path)?);
    entries.insert(path.to_path_buf(), Arc::clone(&text));
    Ok(text)
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
  }
}
