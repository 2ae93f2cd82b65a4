/* src/cli/core/src/build/types.rs */

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Umd,
  Esm,
}

impl OutputFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Umd => "umd",
      Self::Esm => "esm",
    }
  }

  /// ES module output carries no wrapper and therefore no header.
  pub fn is_module(self) -> bool {
    matches!(self, Self::Esm)
  }
}

impl std::fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Where `//!` documentation lines end up after bundling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentMode {
  /// Leave the bundle text untouched.
  #[default]
  Keep,
  /// Hoist every doc comment to the top.
  Full,
  /// Hoist, but drop the per-locale configuration block.
  MainOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HeaderChoice {
  /// Default template for wrapped formats, nothing for ES modules.
  #[default]
  Auto,
  None,
  File(PathBuf),
}

/// One bundler invocation producing exactly one output file.
#[derive(Debug, Clone)]
pub struct BundleJob {
  pub root: PathBuf,
  pub entry: String,
  pub format: OutputFormat,
  pub bundle_name: Option<String>,
  pub exclude_base: bool,
  pub target: PathBuf,
  pub header: HeaderChoice,
  pub skip_lines: Option<usize>,
  pub comments: CommentMode,
}

impl BundleJob {
  pub fn entry_path(&self) -> PathBuf {
    self.root.join(&self.entry)
  }
}

/// Shared settings for every file a batched transpile discovers.
#[derive(Debug, Clone)]
pub struct JobTemplate {
  pub format: OutputFormat,
  pub header: HeaderChoice,
  pub skip_lines: Option<usize>,
  pub comments: CommentMode,
  pub exclude_base: bool,
  pub target_dir: PathBuf,
}

impl JobTemplate {
  pub fn job_for(&self, root: &Path, file: &str) -> BundleJob {
    BundleJob {
      root: root.to_path_buf(),
      entry: file.to_string(),
      format: self.format,
      bundle_name: None,
      exclude_base: self.exclude_base,
      target: self.target_dir.join(file),
      header: self.header.clone(),
      skip_lines: self.skip_lines,
      comments: self.comments,
    }
  }
}
