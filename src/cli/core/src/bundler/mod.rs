/* src/cli/core/src/bundler/mod.rs */

// The module bundler is an external collaborator: entry in, bundle text out.

mod command;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::build::types::OutputFormat;

pub use command::CommandBundler;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleRequest {
  pub entry: PathBuf,
  pub format: OutputFormat,
  pub name: String,
  /// Import specifiers to reference instead of inline.
  pub external: Vec<String>,
  /// Global symbol for each external, used by non-module formats.
  pub globals: BTreeMap<String, String>,
}

#[async_trait]
pub trait Bundler: Send + Sync {
  async fn bundle(&self, request: &BundleRequest) -> Result<String>;
}
