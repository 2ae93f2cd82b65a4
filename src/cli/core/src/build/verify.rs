/* src/cli/core/src/build/verify.rs */

// Post-build consistency check for custom locale aggregates: load the generated
// bundle and make sure every requested locale registered itself.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use crate::shell::{run_capture, which_exists};

#[async_trait]
pub trait LocaleProbe: Send + Sync {
  /// Names of all locales registered after loading `bundle`.
  async fn registered_locales(&self, bundle: &Path) -> Result<Vec<String>>;
}

/// Loads the bundle in a JS runtime and prints `locales()` as JSON.
#[derive(Debug, Clone)]
pub struct RuntimeProbe {
  runtime: String,
  base_dir: PathBuf,
}

impl RuntimeProbe {
  pub fn new(runtime: Option<&str>, base_dir: &Path) -> Self {
    let runtime = match runtime {
      Some(r) => r.to_string(),
      None if which_exists("node") => "node".to_string(),
      None if which_exists("bun") => "bun".to_string(),
      None => "node".to_string(),
    };
    Self { runtime, base_dir: base_dir.to_path_buf() }
  }

  fn script(bundle: &Path) -> Result<String> {
    let literal = serde_json::to_string(&bundle.to_string_lossy())?;
    Ok(format!(
      "const m = require({literal}); process.stdout.write(JSON.stringify(m.locales()));"
    ))
  }
}

#[async_trait]
impl LocaleProbe for RuntimeProbe {
  async fn registered_locales(&self, bundle: &Path) -> Result<Vec<String>> {
    let script = Self::script(bundle)?;
    let label = format!("{} ({})", self.runtime, bundle.display());
    let stdout = run_capture(&self.base_dir, &self.runtime, &["-e", &script], &label, None).await?;
    serde_json::from_str(stdout.trim())
      .with_context(|| format!("unexpected locale list from {}: {stdout}", bundle.display()))
  }
}

/// Compare registered locales (minus the default) against the requested count.
pub async fn verify_locale_count(
  probe: &dyn LocaleProbe,
  bundle: &Path,
  default_locale: &str,
  requested: &[String],
) -> Result<usize> {
  let registered = probe.registered_locales(bundle).await?;
  let extra: Vec<&String> = registered.iter().filter(|l| l.as_str() != default_locale).collect();
  if extra.len() != requested.len() {
    bail!(
      "You probably specified locales requiring parent locale, but didn't specify parent \
       (requested {}: {}; registered {}: {})",
      requested.len(),
      requested.join(", "),
      extra.len(),
      extra.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
    );
  }
  Ok(extra.len())
}
