/* src/cli/core/src/build/pipeline.rs */

// Ordered stage driver: each stage runs to completion before the next starts,
// and the first failure stops the pipeline. Outputs already written stay on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::context::BuildContext;
use crate::ui;

#[async_trait]
pub trait Stage: Send + Sync {
  fn name(&self) -> String;

  /// Run the stage and return the files it wrote.
  async fn run(&self, ctx: &BuildContext) -> Result<Vec<PathBuf>>;
}

#[derive(Debug, Clone)]
pub struct StageReport {
  pub name: String,
  pub outputs: Vec<PathBuf>,
}

#[derive(Default)]
pub struct Pipeline {
  stages: Vec<Box<dyn Stage>>,
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline").field("stages", &self.names()).finish()
  }
}

impl Pipeline {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
    self.stages.push(Box::new(stage));
    self
  }

  pub fn names(&self) -> Vec<String> {
    self.stages.iter().map(|s| s.name()).collect()
  }

  pub async fn run(&self, ctx: &BuildContext) -> Result<Vec<StageReport>> {
    let total = self.stages.len();
    let mut reports = Vec::with_capacity(total);
    for (idx, stage) in self.stages.iter().enumerate() {
      let name = stage.name();
      ui::step(idx + 1, total, &name);
      let outputs = stage.run(ctx).await.with_context(|| format!("stage '{name}' failed"))?;
      print_outputs(ctx, &outputs);
      reports.push(StageReport { name, outputs });
    }
    Ok(reports)
  }
}

fn print_outputs(ctx: &BuildContext, outputs: &[PathBuf]) {
  let shown: Vec<String> = outputs.iter().map(|p| ctx.settings.display_path(p)).collect();
  ui::files(&shown);
}
