/* src/cli/core/src/build/locales.rs */

// Locale aggregates: a synthetic entry that imports the base module plus a set
// of locale modules, staged next to the sources and bundled like any entry.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::context::{BuildContext, BuildSettings};
use super::staging::prepare_staging;
use super::transpile::transpile;
use super::types::{BundleJob, CommentMode, HeaderChoice, OutputFormat};

/// Boilerplate lines the bundler emits for a wrapped aggregate.
const LOCALES_ONLY_SKIP: usize = 7;
const WITH_BASE_SKIP: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
  pub format: OutputFormat,
  /// Reference the base module instead of inlining it (locales-only bundle).
  pub exclude_base: bool,
}

/// JS identifier for a locale module: file stem with `-` turned into `_`.
pub fn locale_identifier(file: &str) -> String {
  let stem = Path::new(file).file_stem().map_or_else(|| file.into(), |s| s.to_string_lossy());
  stem.replace('-', "_")
}

/// Importing a locale module also switches the active locale, so the entry
/// ends by resetting it to the default.
pub fn synthesize_entry(settings: &BuildSettings, locale_files: &[String]) -> String {
  let base = &settings.base_module;
  let base_ident = locale_identifier(base);
  let mut lines = vec![
    format!("import {base_ident} from \"./{base}\";"),
    format!("export default {base_ident};"),
  ];
  for file in locale_files {
    lines.push(format!("import {} from \"./{file}\";", locale_identifier(file)));
  }
  lines.push(format!("{base_ident}.locale('{}');", settings.default_locale));
  lines.join("\n")
}

fn aggregate_job(
  settings: &BuildSettings,
  entry: String,
  target: &Path,
  opts: AggregateOptions,
) -> BundleJob {
  let (header, skip) = if opts.format.is_module() {
    (HeaderChoice::None, 0)
  } else if opts.exclude_base {
    (HeaderChoice::File(settings.locale_header.clone()), LOCALES_ONLY_SKIP)
  } else {
    (HeaderChoice::File(settings.default_header.clone()), WITH_BASE_SKIP)
  };
  BundleJob {
    root: settings.tmp_dir.clone(),
    entry,
    format: opts.format,
    bundle_name: None,
    exclude_base: opts.exclude_base,
    target: target.to_path_buf(),
    header,
    skip_lines: Some(skip),
    comments: CommentMode::Keep,
  }
}

pub async fn generate_locale_bundle(
  ctx: &BuildContext,
  target: &Path,
  locale_files: &[String],
  opts: AggregateOptions,
) -> Result<PathBuf> {
  let settings = &ctx.settings;
  prepare_staging(ctx)?;

  let entry = target
    .file_name()
    .with_context(|| format!("aggregate target {} has no file name", target.display()))?
    .to_string_lossy()
    .to_string();
  let code = synthesize_entry(settings, locale_files);
  ctx.fs.write(&settings.tmp_dir.join(&entry), &code)?;

  transpile(ctx, &aggregate_job(settings, entry, target, opts)).await
}

/// Every locale module matching the configured pattern.
pub fn discover_locales(ctx: &BuildContext) -> Result<Vec<String>> {
  ctx.fs.expand(&ctx.settings.src_dir, &ctx.settings.locales_pattern)
}

/// Put `name` in place of the file-name wildcard, the last `*` of the pattern.
fn name_pattern(pattern: &str, name: &str) -> String {
  match pattern.rfind('*') {
    Some(i) => format!("{}{name}{}", &pattern[..i], &pattern[i + 1..]),
    None => pattern.to_string(),
  }
}

/// Map each requested name to exactly one locale file, in request order.
pub fn resolve_locale_names(ctx: &BuildContext, names: &[String]) -> Result<Vec<String>> {
  let settings = &ctx.settings;
  let mut files = Vec::with_capacity(names.len());
  for name in names {
    let pattern = name_pattern(&settings.locales_pattern, name);
    let mut matches = ctx.fs.expand(&settings.src_dir, &pattern)?;
    match matches.len() {
      1 => files.push(matches.remove(0)),
      0 => bail!("could not find locale: {name}"),
      _ => bail!("locale \"{name}\" is ambiguous: matches {}", matches.join(", ")),
    }
  }
  Ok(files)
}

/// Split a `fr,de-at` list, ignoring blanks.
pub fn parse_locale_list(raw: &str) -> Vec<String> {
  raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
