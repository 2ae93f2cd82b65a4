/* src/cli/core/src/build/run/mod.rs */

// Top-level builds. Each one is a flat pipeline so stage numbering and failure
// reporting stay uniform across commands.

mod stages;

use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};

use super::context::{BuildContext, BuildSettings};
use super::locales::{AggregateOptions, resolve_locale_names};
use super::pipeline::{Pipeline, StageReport};
use super::types::{BundleJob, CommentMode, HeaderChoice, JobTemplate, OutputFormat};
use crate::ui;
use stages::{
  AggregateStage, BatchStage, CleanStage, ConcatTestsStage, LocaleSet, SingleStage, VerifyStage,
};

/// Custom aggregates only exist as wrapped bundles.
const CUSTOM_FORMAT: OutputFormat = OutputFormat::Umd;

/// What `release` should produce besides the per-format builds.
#[derive(Debug, Clone, Default)]
pub struct ReleasePlan {
  pub formats: Vec<OutputFormat>,
  pub concat_tests: bool,
  pub locales: Vec<String>,
}

fn main_entry_job(settings: &BuildSettings, format: OutputFormat) -> BundleJob {
  BundleJob {
    root: settings.src_dir.clone(),
    entry: settings.main_entry.clone(),
    format,
    bundle_name: Some(settings.base_module.clone()),
    exclude_base: false,
    target: settings.format_dir(format).join(&settings.main_entry),
    header: HeaderChoice::Auto,
    skip_lines: Some(if format.is_module() { 0 } else { 5 }),
    comments: CommentMode::Full,
  }
}

/// ES modules carry no wrapper, so they get no header either.
fn wrapped_header(format: OutputFormat, path: &Path) -> HeaderChoice {
  if format.is_module() { HeaderChoice::None } else { HeaderChoice::File(path.to_path_buf()) }
}

fn locale_template(settings: &BuildSettings, format: OutputFormat) -> JobTemplate {
  JobTemplate {
    format,
    header: wrapped_header(format, &settings.locale_header),
    skip_lines: Some(if format.is_module() { 1 } else { 7 }),
    comments: CommentMode::Full,
    exclude_base: true,
    target_dir: settings.format_dir(format),
  }
}

fn test_template(settings: &BuildSettings, format: OutputFormat) -> JobTemplate {
  JobTemplate {
    format,
    header: wrapped_header(format, &settings.test_header),
    skip_lines: Some(7),
    comments: CommentMode::Full,
    exclude_base: true,
    target_dir: settings.format_dir(format),
  }
}

fn aggregate(
  settings: &BuildSettings,
  format: OutputFormat,
  file: &str,
  locales: LocaleSet,
  exclude_base: bool,
) -> AggregateStage {
  let target = settings.format_dir(format).join("min").join(file);
  AggregateStage {
    label: settings.display_path(&target),
    target,
    locales,
    options: AggregateOptions { format, exclude_base },
  }
}

/// Every stage of a format build except the initial clean.
fn add_format_stages(
  mut pipeline: Pipeline,
  settings: &BuildSettings,
  format: OutputFormat,
) -> Pipeline {
  pipeline = pipeline.stage(SingleStage { job: main_entry_job(settings, format) });
  pipeline = pipeline.stage(BatchStage {
    pattern: settings.locales_pattern.clone(),
    template: locale_template(settings, format),
  });
  for pattern in &settings.test_patterns {
    pipeline = pipeline
      .stage(BatchStage { pattern: pattern.clone(), template: test_template(settings, format) });
  }
  pipeline
    .stage(aggregate(settings, format, "locales.js", LocaleSet::Discovered, true))
    .stage(aggregate(settings, format, "moment-with-locales.js", LocaleSet::Discovered, false))
}

fn add_custom_stages(
  pipeline: Pipeline,
  settings: &BuildSettings,
  names: &[String],
  files: Vec<String>,
) -> Pipeline {
  let with_base = aggregate(
    settings,
    CUSTOM_FORMAT,
    "moment-with-locales.custom.js",
    LocaleSet::Files(files.clone()),
    false,
  );
  let bundle = with_base.target.clone();
  pipeline
    .stage(aggregate(settings, CUSTOM_FORMAT, "locales.custom.js", LocaleSet::Files(files), true))
    .stage(with_base)
    .stage(VerifyStage { bundle, requested: names.to_vec() })
}

/// The staging area is cleared along with the format's output so aggregates
/// are bundled from the current sources.
pub fn build_pipeline(settings: &BuildSettings, format: OutputFormat) -> Pipeline {
  let dirs = vec![settings.format_dir(format), settings.tmp_dir.clone()];
  let clean = CleanStage::new(settings, dirs);
  add_format_stages(Pipeline::new().stage(clean), settings, format)
}

/// Names must already be resolved to `files`, one per name.
pub fn custom_pipeline(settings: &BuildSettings, names: &[String], files: Vec<String>) -> Pipeline {
  add_custom_stages(Pipeline::new(), settings, names, files)
}

pub fn release_pipeline(
  settings: &BuildSettings,
  plan: &ReleasePlan,
  custom_files: Vec<String>,
) -> Pipeline {
  let clean = CleanStage::new(settings, vec![settings.out_dir.clone()]);
  let mut pipeline = Pipeline::new().stage(clean);
  for &format in &plan.formats {
    pipeline = add_format_stages(pipeline, settings, format);
  }
  if plan.concat_tests {
    pipeline = pipeline.stage(ConcatTestsStage);
  }
  if !plan.locales.is_empty() {
    pipeline = add_custom_stages(pipeline, settings, &plan.locales, custom_files);
  }
  pipeline
}

async fn run_timed(ctx: &BuildContext, pipeline: Pipeline, what: &str) -> Result<Vec<StageReport>> {
  let started = Instant::now();
  let reports = pipeline.run(ctx).await?;
  let written: usize = reports.iter().map(|r| r.outputs.len()).sum();
  let elapsed = started.elapsed().as_secs_f64();
  ui::blank();
  ui::ok(&format!("{what} complete in {elapsed:.1}s ({})", ui::plural(written, "file")));
  Ok(reports)
}

/// Full build of one output format.
pub async fn run_build(ctx: &BuildContext, format: OutputFormat) -> Result<Vec<StageReport>> {
  run_timed(ctx, build_pipeline(&ctx.settings, format), &format!("{format} build")).await
}

/// Custom-locale aggregates. Every name is resolved before anything is bundled.
pub async fn run_custom(ctx: &BuildContext, names: &[String]) -> Result<Vec<StageReport>> {
  if names.is_empty() {
    bail!("no locales given for the custom build");
  }
  let files = resolve_locale_names(ctx, names)?;
  run_timed(ctx, custom_pipeline(&ctx.settings, names, files), "custom build").await
}

pub async fn run_release(ctx: &BuildContext, plan: &ReleasePlan) -> Result<Vec<StageReport>> {
  let files = resolve_locale_names(ctx, &plan.locales)?;
  run_timed(ctx, release_pipeline(&ctx.settings, plan, files), "release").await
}
