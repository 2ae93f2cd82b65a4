/* src/cli/core/src/bundler/command.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{BundleRequest, Bundler};
use crate::shell::run_shell_capture;

/// Runs a configured command per bundle: the request goes to stdin as JSON,
/// the bundle text comes back on stdout.
#[derive(Debug, Clone)]
pub struct CommandBundler {
  command: String,
  base_dir: PathBuf,
}

impl CommandBundler {
  pub fn new(command: impl Into<String>, base_dir: &Path) -> Self {
    Self { command: command.into(), base_dir: base_dir.to_path_buf() }
  }
}

#[async_trait]
impl Bundler for CommandBundler {
  async fn bundle(&self, request: &BundleRequest) -> Result<String> {
    let payload = serde_json::to_string(request).context("failed to encode bundle request")?;
    let label = format!("bundler ({})", request.entry.display());
    run_shell_capture(&self.base_dir, &self.command, &label, Some(&payload)).await
  }
}
