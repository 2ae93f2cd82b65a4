/* src/cli/core/src/build/testing.rs */

// Test doubles for the external collaborators: a counting filesystem, a
// bundler that echoes its entry behind fake boilerplate, and locale probes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;
use regex::Regex;

use super::context::{BuildContext, BuildSettings};
use super::verify::LocaleProbe;
use crate::bundler::{BundleRequest, Bundler};
use crate::config::TranspileConfig;
use crate::fs::{DiskFs, Fs};

/// Lines the stub bundler emits before the entry source.
pub const PREAMBLE_LINES: usize = 7;

#[derive(Debug, Default)]
pub struct CountingFs {
  reads: Mutex<HashMap<PathBuf, usize>>,
  copies: AtomicUsize,
  writes: AtomicUsize,
}

impl CountingFs {
  pub fn reads_of(&self, path: &Path) -> usize {
    self.reads.lock().unwrap().get(path).copied().unwrap_or(0)
  }

  pub fn total_reads(&self) -> usize {
    self.reads.lock().unwrap().values().sum()
  }

  pub fn copies(&self) -> usize {
    self.copies.load(Ordering::SeqCst)
  }

  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }
}

impl Fs for CountingFs {
  fn read(&self, path: &Path) -> Result<String> {
    *self.reads.lock().unwrap().entry(path.to_path_buf()).or_default() += 1;
    DiskFs.read(path)
  }

  fn write(&self, path: &Path, contents: &str) -> Result<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    DiskFs.write(path, contents)
  }

  fn copy(&self, from: &Path, to: &Path) -> Result<()> {
    self.copies.fetch_add(1, Ordering::SeqCst);
    DiskFs.copy(from, to)
  }

  fn exists(&self, path: &Path) -> bool {
    DiskFs.exists(path)
  }

  fn expand(&self, root: &Path, pattern: &str) -> Result<Vec<String>> {
    DiskFs.expand(root, pattern)
  }

  fn remove_dir_all(&self, path: &Path) -> Result<bool> {
    DiskFs.remove_dir_all(path)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  Start(PathBuf),
  End(PathBuf),
}

/// Returns `PREAMBLE_LINES` numbered boilerplate lines followed by the entry
/// file's source. Tracks concurrency and start/end ordering.
#[derive(Debug, Default)]
pub struct StubBundler {
  pub requests: Mutex<Vec<BundleRequest>>,
  pub events: Mutex<Vec<Event>>,
  in_flight: AtomicUsize,
  max_in_flight: AtomicUsize,
  fail_on: Option<String>,
}

impl StubBundler {
  pub fn failing_on(suffix: &str) -> Self {
    Self { fail_on: Some(suffix.to_string()), ..Self::default() }
  }

  pub fn calls(&self) -> usize {
    self.requests.lock().unwrap().len()
  }

  pub fn max_in_flight(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }

  pub fn request_for(&self, entry_suffix: &str) -> Option<BundleRequest> {
    self.requests.lock().unwrap().iter().find(|r| r.entry.ends_with(entry_suffix)).cloned()
  }

  pub fn preamble() -> String {
    (1..=PREAMBLE_LINES).map(|i| format!("// preamble {i}\n")).collect()
  }
}

#[async_trait]
impl Bundler for StubBundler {
  async fn bundle(&self, request: &BundleRequest) -> Result<String> {
    self.requests.lock().unwrap().push(request.clone());
    self.events.lock().unwrap().push(Event::Start(request.entry.clone()));
    let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(now, Ordering::SeqCst);

    // Let every other job of the batch get started before this one finishes.
    for _ in 0..4 {
      tokio::task::yield_now().await;
    }

    self.in_flight.fetch_sub(1, Ordering::SeqCst);
    self.events.lock().unwrap().push(Event::End(request.entry.clone()));

    if let Some(suffix) = &self.fail_on
      && request.entry.ends_with(suffix)
    {
      bail!("Could not resolve './missing' from {}", request.entry.display());
    }
    let source = std::fs::read_to_string(&request.entry)?;
    Ok(format!("{}{source}", Self::preamble()))
  }
}

/// Always reports the same locale list.
#[derive(Debug)]
pub struct FixedProbe {
  locales: Vec<String>,
}

impl FixedProbe {
  pub fn new(locales: &[&str]) -> Self {
    Self { locales: locales.iter().map(|s| (*s).to_string()).collect() }
  }
}

#[async_trait]
impl LocaleProbe for FixedProbe {
  async fn registered_locales(&self, _bundle: &Path) -> Result<Vec<String>> {
    Ok(self.locales.clone())
  }
}

/// Mimics locale registration: reads the aggregate, finds the imported locale
/// modules and registers each one whose `parentLocale` (if any) is also imported.
#[derive(Debug)]
pub struct SourceProbe {
  src_dir: PathBuf,
  default_locale: String,
}

impl SourceProbe {
  pub fn new(src_dir: &Path, default_locale: &str) -> Self {
    Self { src_dir: src_dir.to_path_buf(), default_locale: default_locale.to_string() }
  }
}

#[async_trait]
impl LocaleProbe for SourceProbe {
  async fn registered_locales(&self, bundle: &Path) -> Result<Vec<String>> {
    let import_re = Regex::new(r#"from "\./locale/([^"]+)\.js""#)?;
    let parent_re = Regex::new(r"parentLocale\s*:\s*'([^']+)'")?;
    let text = std::fs::read_to_string(bundle)?;
    let imported: Vec<String> = import_re.captures_iter(&text).map(|c| c[1].to_string()).collect();

    let mut registered = vec![self.default_locale.clone()];
    for name in &imported {
      let source = std::fs::read_to_string(self.src_dir.join(format!("locale/{name}.js")))?;
      let satisfied = match parent_re.captures(&source) {
        Some(c) => imported.iter().any(|i| i == &c[1]),
        None => true,
      };
      if satisfied {
        registered.push(name.clone());
      }
    }
    Ok(registered)
  }
}

/// Scratch project on disk with the usual source layout and header templates.
pub struct Fixture {
  pub dir: tempfile::TempDir,
}

impl Fixture {
  pub fn new() -> Self {
    let fixture = Self { dir: tempfile::tempdir().unwrap() };
    fixture.write("templates/default.js", "/* default header */\n");
    fixture.write("templates/locale-header.js", "/* locale header */\n");
    fixture.write("templates/test-header.js", "/* test header */\n");
    fixture.write(
      "src/moment.js",
      "//! moment.js\n//! version : 2.30.1\nexport default function moment() {}\n",
    );
    fixture
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  pub fn write(&self, rel: &str, contents: &str) {
    DiskFs.write(&self.root().join(rel), contents).unwrap();
  }

  pub fn read(&self, rel: &str) -> String {
    std::fs::read_to_string(self.root().join(rel)).unwrap()
  }

  pub fn exists(&self, rel: &str) -> bool {
    self.root().join(rel).exists()
  }

  pub fn add_locale(&self, name: &str, parent: Option<&str>) {
    let parent_line = parent.map(|p| format!("  parentLocale: '{p}',\n")).unwrap_or_default();
    self.write(
      &format!("src/locale/{name}.js"),
      &format!(
        "//! moment.js locale configuration\n//! locale : {name}\n\
         import moment from '../moment';\n\
         export default moment.defineLocale('{name}', {{\n{parent_line}}});\n"
      ),
    );
  }

  pub fn settings(&self, config: &TranspileConfig) -> BuildSettings {
    BuildSettings::from_config(config, self.root())
  }

  pub fn context(
    &self,
    config: &TranspileConfig,
    fs: Arc<dyn Fs>,
    bundler: Arc<dyn Bundler>,
    probe: Arc<dyn LocaleProbe>,
  ) -> BuildContext {
    BuildContext::new(self.settings(config), fs, bundler, probe)
  }
}
