/* src/cli/core/src/build/run/stages.rs */

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use super::super::batch::transpile_many;
use super::super::concat::concat_tests;
use super::super::context::{BuildContext, BuildSettings};
use super::super::locales::{AggregateOptions, discover_locales, generate_locale_bundle};
use super::super::pipeline::Stage;
use super::super::transpile::transpile;
use super::super::types::{BundleJob, JobTemplate};
use super::super::verify::verify_locale_count;
use crate::clean::delete_dir_if_exists;
use crate::ui;

/// Remove previous output directories.
pub(super) struct CleanStage {
  pub dirs: Vec<PathBuf>,
  pub label: String,
}

impl CleanStage {
  pub fn new(settings: &BuildSettings, dirs: Vec<PathBuf>) -> Self {
    let label = dirs.iter().map(|d| settings.display_path(d)).collect::<Vec<_>>().join(" ");
    Self { dirs, label }
  }
}

#[async_trait]
impl Stage for CleanStage {
  fn name(&self) -> String {
    format!("clean {}", self.label)
  }

  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    for dir in &self.dirs {
      delete_dir_if_exists(ctx, dir)?;
    }
    Ok(Vec::new())
  }
}

/// Exactly one bundle, e.g. the base module itself.
pub(super) struct SingleStage {
  pub job: BundleJob,
}

#[async_trait]
impl Stage for SingleStage {
  fn name(&self) -> String {
    format!("bundle {}", self.job.entry)
  }

  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    Ok(vec![transpile(ctx, &self.job).await?])
  }
}

/// Every source matching `pattern`, bundled in batches.
pub(super) struct BatchStage {
  pub pattern: String,
  pub template: JobTemplate,
}

#[async_trait]
impl Stage for BatchStage {
  fn name(&self) -> String {
    format!("bundle {}", self.pattern)
  }

  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    transpile_many(ctx, &ctx.settings.src_dir, &self.pattern, &self.template).await
  }
}

/// Which locale modules go into an aggregate.
#[derive(Debug, Clone)]
pub(super) enum LocaleSet {
  /// Whatever the locale pattern matches at run time.
  Discovered,
  Files(Vec<String>),
}

pub(super) struct AggregateStage {
  pub target: PathBuf,
  pub label: String,
  pub locales: LocaleSet,
  pub options: AggregateOptions,
}

#[async_trait]
impl Stage for AggregateStage {
  fn name(&self) -> String {
    format!("aggregate {}", self.label)
  }

  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let files = match &self.locales {
      LocaleSet::Discovered => discover_locales(ctx)?,
      LocaleSet::Files(files) => files.clone(),
    };
    Ok(vec![generate_locale_bundle(ctx, &self.target, &files, self.options).await?])
  }
}

/// Load a generated aggregate and make sure every requested locale registered.
pub(super) struct VerifyStage {
  pub bundle: PathBuf,
  pub requested: Vec<String>,
}

#[async_trait]
impl Stage for VerifyStage {
  fn name(&self) -> String {
    "verify locale registration".to_string()
  }

  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let settings = &ctx.settings;
    let n = verify_locale_count(
      ctx.probe.as_ref(),
      &self.bundle,
      &settings.default_locale,
      &self.requested,
    )
    .await?;
    ui::detail(&format!("{} registered", ui::plural(n, "locale")));
    Ok(Vec::new())
  }
}

/// Join the built UMD tests into a single file.
pub(super) struct ConcatTestsStage;

#[async_trait]
impl Stage for ConcatTestsStage {
  fn name(&self) -> String {
    "concat tests".to_string()
  }

  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    match concat_tests(ctx)? {
      Some(path) => Ok(vec![path]),
      None => {
        ui::warn("no built umd tests, skipping concatenation");
        Ok(Vec::new())
      }
    }
  }
}
