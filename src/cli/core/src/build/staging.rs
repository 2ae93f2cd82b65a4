/* src/cli/core/src/build/staging.rs */

use anyhow::Result;

use super::context::BuildContext;

/// Sources copied into the staging area.
const STAGED_PATTERN: &str = "**/*.js";

/// Copy the source tree into the staging directory unless it already exists.
/// An existing directory is reused as-is, even if stale. Returns the number of
/// files copied.
pub fn prepare_staging(ctx: &BuildContext) -> Result<usize> {
  let settings = &ctx.settings;
  if ctx.fs.exists(&settings.tmp_dir) {
    return Ok(0);
  }
  let files = ctx.fs.expand(&settings.src_dir, STAGED_PATTERN)?;
  for file in &files {
    ctx.fs.copy(&settings.src_dir.join(file), &settings.tmp_dir.join(file))?;
  }
  Ok(files.len())
}
