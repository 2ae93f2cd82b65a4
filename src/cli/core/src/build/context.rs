/* src/cli/core/src/build/context.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::header::HeaderCache;
use super::types::OutputFormat;
use super::verify::{LocaleProbe, RuntimeProbe};
use crate::bundler::{Bundler, CommandBundler};
use crate::config::{BatchMode, TranspileConfig};
use crate::fs::{DiskFs, Fs};

/// Config with every path resolved against the project root.
#[derive(Debug, Clone)]
pub struct BuildSettings {
  pub base_dir: PathBuf,
  pub src_dir: PathBuf,
  pub out_dir: PathBuf,
  pub tmp_dir: PathBuf,
  pub default_header: PathBuf,
  pub locale_header: PathBuf,
  pub test_header: PathBuf,
  pub base_module: String,
  pub base_global: String,
  pub default_locale: String,
  pub locale_marker: String,
  pub main_entry: String,
  pub locales_pattern: String,
  pub test_patterns: Vec<String>,
  pub batch_size: usize,
  pub batch_mode: BatchMode,
}

impl BuildSettings {
  pub fn from_config(config: &TranspileConfig, base_dir: &Path) -> Self {
    Self {
      base_dir: base_dir.to_path_buf(),
      src_dir: base_dir.join(&config.paths.src),
      out_dir: base_dir.join(&config.paths.out_dir),
      tmp_dir: base_dir.join(&config.paths.tmp_dir),
      default_header: base_dir.join(&config.templates.default),
      locale_header: base_dir.join(&config.templates.locale),
      test_header: base_dir.join(&config.templates.test),
      base_module: config.base.module.clone(),
      base_global: config.base.global.clone(),
      default_locale: config.base.default_locale.clone(),
      locale_marker: config.base.locale_marker.clone(),
      main_entry: config.entries.main.clone(),
      locales_pattern: config.entries.locales.clone(),
      test_patterns: config.entries.tests.clone(),
      batch_size: config.batch.size,
      batch_mode: config.batch.mode,
    }
  }

  /// `<out>/<format>`
  pub fn format_dir(&self, format: OutputFormat) -> PathBuf {
    self.out_dir.join(format.as_str())
  }

  /// Path relative to the project root, for display.
  pub fn display_path(&self, path: &Path) -> String {
    path.strip_prefix(&self.base_dir).unwrap_or(path).display().to_string()
  }
}

/// State owned by a single build invocation. The header cache and the staging
/// directory live here instead of in process-wide globals.
pub struct BuildContext {
  pub settings: BuildSettings,
  pub fs: Arc<dyn Fs>,
  pub bundler: Arc<dyn Bundler>,
  pub probe: Arc<dyn LocaleProbe>,
  pub headers: HeaderCache,
}

impl std::fmt::Debug for BuildContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BuildContext")
      .field("settings", &self.settings)
      .field("headers", &self.headers)
      .finish_non_exhaustive()
  }
}

impl BuildContext {
  pub fn new(
    settings: BuildSettings,
    fs: Arc<dyn Fs>,
    bundler: Arc<dyn Bundler>,
    probe: Arc<dyn LocaleProbe>,
  ) -> Self {
    Self { settings, fs, bundler, probe, headers: HeaderCache::new() }
  }

  /// Context backed by the real disk, the configured bundler command and a JS runtime.
  pub fn from_config(config: &TranspileConfig, base_dir: &Path) -> Self {
    let settings = BuildSettings::from_config(config, base_dir);
    let bundler = CommandBundler::new(config.bundler.command.clone(), base_dir);
    let probe = RuntimeProbe::new(config.check.runtime.as_deref(), base_dir);
    Self::new(settings, Arc::new(DiskFs), Arc::new(bundler), Arc::new(probe))
  }
}
