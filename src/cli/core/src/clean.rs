/* src/cli/core/src/clean.rs */

// `locale-transpile clean` and the clean stage of every build.

use std::path::Path;

use anyhow::Result;

use crate::build::context::BuildContext;
use crate::ui;

/// Remove the whole output directory, staging area included.
pub fn run_clean(ctx: &BuildContext) -> Result<()> {
  ui::arrow("cleaning build output");
  delete_dir_if_exists(ctx, &ctx.settings.out_dir)?;
  ui::ok("clean complete");
  Ok(())
}

pub(crate) fn delete_dir_if_exists(ctx: &BuildContext, path: &Path) -> Result<bool> {
  let removed = ctx.fs.remove_dir_all(path)?;
  if removed {
    ui::detail(&format!("deleted {}", ctx.settings.display_path(path)));
  }
  Ok(removed)
}
