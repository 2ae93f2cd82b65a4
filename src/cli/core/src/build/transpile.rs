/* src/cli/core/src/build/transpile.rs */

// Single-unit transpile: bundle one entry, strip the bundler's boilerplate,
// prepend a header, hoist doc comments, write the target.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use super::context::{BuildContext, BuildSettings};
use super::header::NO_HEADER;
use super::relocate::relocate;
use super::types::{BundleJob, CommentMode, HeaderChoice};
use crate::bundler::BundleRequest;

/// Lines dropped from bundler output when a job does not say otherwise.
pub const DEFAULT_SKIP_LINES: usize = 5;

/// Bundle name used whenever the real one does not matter.
pub const UNUSED_NAME: &str = "not_used";

fn header_path(settings: &BuildSettings, job: &BundleJob) -> PathBuf {
  match &job.header {
    HeaderChoice::Auto if job.format.is_module() => PathBuf::from(NO_HEADER),
    HeaderChoice::Auto => settings.default_header.clone(),
    HeaderChoice::None => PathBuf::from(NO_HEADER),
    HeaderChoice::File(path) => path.clone(),
  }
}

fn bundle_name(job: &BundleJob) -> String {
  match &job.header {
    HeaderChoice::File(_) => UNUSED_NAME.to_string(),
    _ => job.bundle_name.clone().unwrap_or_else(|| UNUSED_NAME.to_string()),
  }
}

/// Every spelling under which locale and test sources import the base module.
fn base_externals(settings: &BuildSettings) -> (Vec<String>, BTreeMap<String, String>) {
  let module = &settings.base_module;
  let src_abs = settings.src_dir.join(module).to_string_lossy().to_string();
  let tmp_abs = settings.tmp_dir.join(module).to_string_lossy().to_string();

  let external = vec![
    format!("./{module}"),
    format!("../{module}"),
    format!("../../{module}"),
    src_abs.clone(),
    tmp_abs.clone(),
  ];
  let mut globals = BTreeMap::new();
  globals.insert(src_abs, settings.base_global.clone());
  globals.insert(tmp_abs, settings.base_global.clone());
  (external, globals)
}

pub(super) fn bundle_request(settings: &BuildSettings, job: &BundleJob) -> BundleRequest {
  let (external, globals) =
    if job.exclude_base { base_externals(settings) } else { (Vec::new(), BTreeMap::new()) };
  BundleRequest {
    entry: job.entry_path(),
    format: job.format,
    name: bundle_name(job),
    external,
    globals,
  }
}

fn strip_lines(code: &str, skip: usize) -> String {
  code.split('\n').skip(skip).collect::<Vec<_>>().join("\n")
}

pub async fn transpile(ctx: &BuildContext, job: &BundleJob) -> Result<PathBuf> {
  let settings = &ctx.settings;
  let header = ctx.headers.get(ctx.fs.as_ref(), &header_path(settings, job))?;

  let request = bundle_request(settings, job);
  let code = ctx.bundler.bundle(&request).await?;

  let skip = job.skip_lines.unwrap_or(DEFAULT_SKIP_LINES);
  let mut fixed = format!("{header}{}", strip_lines(&code, skip));
  if job.comments != CommentMode::Keep {
    fixed = relocate(&fixed, job.comments, &settings.locale_marker);
  }

  ctx.fs.write(&job.target, &fixed)?;
  Ok(job.target.clone())
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::build::testing::{CountingFs, FixedProbe, Fixture, StubBundler};
  use crate::build::types::OutputFormat;
  use crate::config::TranspileConfig;

  fn job(fixture: &Fixture, format: OutputFormat) -> BundleJob {
    BundleJob {
      root: fixture.root().join("src"),
      entry: "moment.js".to_string(),
      format,
      bundle_name: Some("moment".to_string()),
      exclude_base: false,
      target: fixture.root().join("build/umd/moment.js"),
      header: HeaderChoice::Auto,
      skip_lines: None,
      comments: CommentMode::Full,
    }
  }

  #[tokio::test]
  async fn umd_main_gets_default_header_and_hoisted_comments() {
    let fixture = Fixture::new();
    let bundler = Arc::new(StubBundler::default());
    let ctx = fixture.context(
      &TranspileConfig::default(),
      Arc::new(CountingFs::default()),
      bundler.clone(),
      Arc::new(FixedProbe::new(&[])),
    );

    let out = transpile(&ctx, &job(&fixture, OutputFormat::Umd)).await.unwrap();
    assert_eq!(out, fixture.root().join("build/umd/moment.js"));

    // Skip 5 of 7 preamble lines; doc comments hoisted above the header.
    assert_eq!(
      fixture.read("build/umd/moment.js"),
      "//! moment.js\n//! version : 2.30.1\n\n/* default header */\n\
       // preamble 6\n// preamble 7\nexport default function moment() {}\n"
    );

    let request = bundler.request_for("moment.js").unwrap();
    assert_eq!(request.name, "moment");
    assert_eq!(request.format, OutputFormat::Umd);
    assert!(request.external.is_empty());
  }

  #[tokio::test]
  async fn esm_auto_header_is_empty() {
    let fixture = Fixture::new();
    let fs = Arc::new(CountingFs::default());
    let ctx = fixture.context(
      &TranspileConfig::default(),
      fs.clone(),
      Arc::new(StubBundler::default()),
      Arc::new(FixedProbe::new(&[])),
    );
    let mut j = job(&fixture, OutputFormat::Esm);
    j.skip_lines = Some(7);
    j.comments = CommentMode::Keep;

    transpile(&ctx, &j).await.unwrap();
    assert_eq!(
      fixture.read("build/umd/moment.js"),
      "//! moment.js\n//! version : 2.30.1\nexport default function moment() {}\n"
    );
    assert_eq!(fs.total_reads(), 0);
  }

  #[test]
  fn explicit_header_forces_unused_name_and_externals() {
    let fixture = Fixture::new();
    let settings = fixture.settings(&TranspileConfig::default());
    let mut j = job(&fixture, OutputFormat::Umd);
    j.header = HeaderChoice::File(settings.locale_header.clone());
    j.exclude_base = true;

    let request = bundle_request(&settings, &j);
    assert_eq!(request.name, UNUSED_NAME);
    assert_eq!(&request.external[..3], ["./moment", "../moment", "../../moment"]);
    let src_abs = settings.src_dir.join("moment").to_string_lossy().to_string();
    let tmp_abs = settings.tmp_dir.join("moment").to_string_lossy().to_string();
    assert!(request.external.contains(&src_abs));
    assert!(request.external.contains(&tmp_abs));
    assert_eq!(request.globals.get(&src_abs).map(String::as_str), Some("moment"));
    assert_eq!(request.globals.get(&tmp_abs).map(String::as_str), Some("moment"));
  }

  #[tokio::test]
  async fn bundler_error_leaves_no_target() {
    let fixture = Fixture::new();
    let ctx = fixture.context(
      &TranspileConfig::default(),
      Arc::new(CountingFs::default()),
      Arc::new(StubBundler::failing_on("moment.js")),
      Arc::new(FixedProbe::new(&[])),
    );
    let err = transpile(&ctx, &job(&fixture, OutputFormat::Umd)).await.unwrap_err();
    assert!(err.to_string().contains("Could not resolve"));
    assert!(!fixture.exists("build/umd/moment.js"));
  }

  #[tokio::test]
  async fn missing_header_fails_before_bundling() {
    let fixture = Fixture::new();
    let bundler = Arc::new(StubBundler::default());
    let ctx = fixture.context(
      &TranspileConfig::default(),
      Arc::new(CountingFs::default()),
      bundler.clone(),
      Arc::new(FixedProbe::new(&[])),
    );
    let mut j = job(&fixture, OutputFormat::Umd);
    j.header = HeaderChoice::File(fixture.root().join("templates/nope.js"));
    assert!(transpile(&ctx, &j).await.is_err());
    assert_eq!(bundler.calls(), 0);
  }

  #[test]
  fn strip_lines_drops_leading_lines() {
    assert_eq!(strip_lines("a\nb\nc", 0), "a\nb\nc");
    assert_eq!(strip_lines("a\nb\nc", 2), "c");
    assert_eq!(strip_lines("a\nb\nc", 5), "");
  }
}
