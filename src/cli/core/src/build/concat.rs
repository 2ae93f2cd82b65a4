/* src/cli/core/src/build/concat.rs */

use std::path::PathBuf;

use anyhow::Result;

use super::context::BuildContext;
use super::types::OutputFormat;

/// Join every built UMD test bundle into `<out>/umd/min/tests.js`.
/// Returns None when there is nothing to join.
pub fn concat_tests(ctx: &BuildContext) -> Result<Option<PathBuf>> {
  let umd_dir = ctx.settings.format_dir(OutputFormat::Umd);
  let files = ctx.fs.expand(&umd_dir, "test/**/*.js")?;
  if files.is_empty() {
    return Ok(None);
  }
  let mut parts = Vec::with_capacity(files.len());
  for file in &files {
    parts.push(ctx.fs.read(&umd_dir.join(file))?);
  }
  let target = umd_dir.join("min/tests.js");
  ctx.fs.write(&target, &parts.join("\n"))?;
  Ok(Some(target))
}
