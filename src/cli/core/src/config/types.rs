/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::build::types::OutputFormat;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranspileConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default)]
  pub paths: PathsSection,
  #[serde(default)]
  pub templates: TemplatesSection,
  #[serde(default)]
  pub base: BaseSection,
  #[serde(default)]
  pub entries: EntriesSection,
  #[serde(default)]
  pub bundler: BundlerSection,
  #[serde(default)]
  pub batch: BatchSection,
  #[serde(default)]
  pub check: CheckSection,
  #[serde(default)]
  pub release: ReleaseSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self { name: default_base_module() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
  #[serde(default = "default_src")]
  pub src: String,
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  #[serde(default = "default_tmp_dir")]
  pub tmp_dir: String,
}

impl Default for PathsSection {
  fn default() -> Self {
    Self { src: default_src(), out_dir: default_out_dir(), tmp_dir: default_tmp_dir() }
  }
}

fn default_src() -> String {
  "src".to_string()
}

fn default_out_dir() -> String {
  "build".to_string()
}

fn default_tmp_dir() -> String {
  "build/tmp".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesSection {
  #[serde(default = "default_template")]
  pub default: String,
  #[serde(default = "default_locale_template")]
  pub locale: String,
  #[serde(default = "default_test_template")]
  pub test: String,
}

impl Default for TemplatesSection {
  fn default() -> Self {
    Self {
      default: default_template(),
      locale: default_locale_template(),
      test: default_test_template(),
    }
  }
}

fn default_template() -> String {
  "templates/default.js".to_string()
}

fn default_locale_template() -> String {
  "templates/locale-header.js".to_string()
}

fn default_test_template() -> String {
  "templates/test-header.js".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseSection {
  #[serde(default = "default_base_module")]
  pub module: String,
  #[serde(default = "default_base_module")]
  pub global: String,
  #[serde(default = "default_locale")]
  pub default_locale: String,
  #[serde(default = "default_locale_marker")]
  pub locale_marker: String,
}

impl Default for BaseSection {
  fn default() -> Self {
    Self {
      module: default_base_module(),
      global: default_base_module(),
      default_locale: default_locale(),
      locale_marker: default_locale_marker(),
    }
  }
}

fn default_base_module() -> String {
  "moment".to_string()
}

fn default_locale() -> String {
  "en".to_string()
}

fn default_locale_marker() -> String {
  "//! moment.js locale configuration".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntriesSection {
  #[serde(default = "default_main_entry")]
  pub main: String,
  #[serde(default = "default_locales_pattern")]
  pub locales: String,
  #[serde(default = "default_test_patterns")]
  pub tests: Vec<String>,
}

impl Default for EntriesSection {
  fn default() -> Self {
    Self {
      main: default_main_entry(),
      locales: default_locales_pattern(),
      tests: default_test_patterns(),
    }
  }
}

fn default_main_entry() -> String {
  "moment.js".to_string()
}

fn default_locales_pattern() -> String {
  "locale/*.js".to_string()
}

fn default_test_patterns() -> Vec<String> {
  vec!["test/moment/*.js".to_string(), "test/locale/*.js".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundlerSection {
  #[serde(default = "default_bundler_command")]
  pub command: String,
}

impl Default for BundlerSection {
  fn default() -> Self {
    Self { command: default_bundler_command() }
  }
}

fn default_bundler_command() -> String {
  "node scripts/bundle.mjs".to_string()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
  /// Fixed-size batches with a full barrier between them.
  #[default]
  Batched,
  /// Semaphore-gated queue: a new job starts as soon as a slot frees up.
  Pooled,
}

impl BatchMode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Batched => "batched",
      Self::Pooled => "pooled",
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSection {
  #[serde(default = "default_batch_size")]
  pub size: usize,
  #[serde(default)]
  pub mode: BatchMode,
}

impl Default for BatchSection {
  fn default() -> Self {
    Self { size: default_batch_size(), mode: BatchMode::default() }
  }
}

fn default_batch_size() -> usize {
  50
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckSection {
  /// JS runtime used to load generated bundles; autodetected when unset.
  pub runtime: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSection {
  #[serde(default = "default_release_formats")]
  pub formats: Vec<OutputFormat>,
  #[serde(default = "default_true")]
  pub concat_tests: bool,
}

impl Default for ReleaseSection {
  fn default() -> Self {
    Self { formats: default_release_formats(), concat_tests: true }
  }
}

fn default_release_formats() -> Vec<OutputFormat> {
  vec![OutputFormat::Esm]
}

fn default_true() -> bool {
  true
}

impl TranspileConfig {
  pub fn validate(&self) -> Result<()> {
    if self.batch.size == 0 {
      bail!("batch.size must be greater than 0");
    }
    if self.base.module.is_empty() {
      bail!("base.module must not be empty");
    }
    if self.entries.main.is_empty() {
      bail!("entries.main must not be empty");
    }
    if self.release.formats.is_empty() {
      bail!("release.formats must list at least one format");
    }
    Ok(())
  }
}
