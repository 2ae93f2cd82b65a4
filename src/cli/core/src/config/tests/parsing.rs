/* src/cli/core/src/config/tests/parsing.rs */

use crate::build::types::OutputFormat;
use crate::config::{BatchMode, TranspileConfig, parse_config};

#[test]
fn empty_config_uses_defaults() {
  let config = parse_config("").unwrap();
  assert_eq!(config.project.name, "moment");
  assert_eq!(config.paths.src, "src");
  assert_eq!(config.paths.out_dir, "build");
  assert_eq!(config.paths.tmp_dir, "build/tmp");
  assert_eq!(config.templates.locale, "templates/locale-header.js");
  assert_eq!(config.base.module, "moment");
  assert_eq!(config.base.default_locale, "en");
  assert_eq!(config.entries.locales, "locale/*.js");
  assert_eq!(config.entries.tests, vec!["test/moment/*.js", "test/locale/*.js"]);
  assert_eq!(config.batch.size, 50);
  assert_eq!(config.batch.mode, BatchMode::Batched);
  assert!(config.check.runtime.is_none());
  assert_eq!(config.release.formats, vec![OutputFormat::Esm]);
  assert!(config.release.concat_tests);
}

#[test]
fn full_config_overrides() {
  let config = parse_config(
    r#"
[project]
name = "dayjs"

[paths]
src = "lib"
out_dir = "dist"
tmp_dir = "dist/.staging"

[templates]
default = "hdr/default.js"
locale = "hdr/locale.js"
test = "hdr/test.js"

[base]
module = "dayjs"
global = "dayjs"
default_locale = "en-us"
locale_marker = "//! dayjs locale"

[entries]
main = "dayjs.js"
locales = "locales/*.js"
tests = []

[bundler]
command = "bun scripts/rollup.mjs"

[batch]
size = 8
mode = "pooled"

[check]
runtime = "bun"

[release]
formats = ["umd", "esm"]
concat_tests = false
"#,
  )
  .unwrap();

  assert_eq!(config.project.name, "dayjs");
  assert_eq!(config.paths.tmp_dir, "dist/.staging");
  assert_eq!(config.templates.test, "hdr/test.js");
  assert_eq!(config.base.default_locale, "en-us");
  assert_eq!(config.base.locale_marker, "//! dayjs locale");
  assert_eq!(config.entries.main, "dayjs.js");
  assert!(config.entries.tests.is_empty());
  assert_eq!(config.bundler.command, "bun scripts/rollup.mjs");
  assert_eq!(config.batch.size, 8);
  assert_eq!(config.batch.mode, BatchMode::Pooled);
  assert_eq!(config.check.runtime.as_deref(), Some("bun"));
  assert_eq!(config.release.formats, vec![OutputFormat::Umd, OutputFormat::Esm]);
  assert!(!config.release.concat_tests);
}

#[test]
fn zero_batch_size_rejected() {
  let err = parse_config("[batch]\nsize = 0\n").unwrap_err();
  assert!(err.to_string().contains("batch.size"));
}

#[test]
fn empty_release_formats_rejected() {
  let err = parse_config("[release]\nformats = []\n").unwrap_err();
  assert!(err.to_string().contains("release.formats"));
}

#[test]
fn unknown_format_rejected() {
  assert!(parse_config("[release]\nformats = [\"amd\"]\n").is_err());
}

#[test]
fn default_struct_is_valid() {
  assert!(TranspileConfig::default().validate().is_ok());
  assert_eq!(BatchMode::Pooled.as_str(), "pooled");
}
