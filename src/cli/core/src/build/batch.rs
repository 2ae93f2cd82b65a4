/* src/cli/core/src/build/batch.rs */

// Batched transpile: discover entries by pattern and run them with bounded
// concurrency. Batches are strictly sequential; the first failure aborts the rest.

use std::path::{Path, PathBuf};

use anyhow::Result;
use futures_util::future::try_join_all;
use tokio::sync::Semaphore;

use super::context::BuildContext;
use super::transpile::transpile;
use super::types::{BundleJob, JobTemplate};
use crate::config::BatchMode;

pub async fn transpile_many(
  ctx: &BuildContext,
  root: &Path,
  pattern: &str,
  template: &JobTemplate,
) -> Result<Vec<PathBuf>> {
  let files = ctx.fs.expand(root, pattern)?;
  let jobs: Vec<BundleJob> = files.iter().map(|file| template.job_for(root, file)).collect();
  run_jobs(ctx, &jobs).await
}

pub async fn run_jobs(ctx: &BuildContext, jobs: &[BundleJob]) -> Result<Vec<PathBuf>> {
  let size = ctx.settings.batch_size.max(1);
  match ctx.settings.batch_mode {
    BatchMode::Batched => run_batched(ctx, jobs, size).await,
    BatchMode::Pooled => run_pooled(ctx, jobs, size).await,
  }
}

/// All jobs of a batch are in flight together; the next batch waits for every one of them.
async fn run_batched(ctx: &BuildContext, jobs: &[BundleJob], size: usize) -> Result<Vec<PathBuf>> {
  let mut written = Vec::with_capacity(jobs.len());
  for batch in jobs.chunks(size) {
    let outputs = try_join_all(batch.iter().map(|job| transpile(ctx, job))).await?;
    written.extend(outputs);
  }
  Ok(written)
}

/// At most `size` jobs in flight; a finished job frees its slot immediately.
async fn run_pooled(ctx: &BuildContext, jobs: &[BundleJob], size: usize) -> Result<Vec<PathBuf>> {
  let semaphore = Semaphore::new(size);
  let semaphore = &semaphore;
  try_join_all(jobs.iter().map(|job| async move {
    let _permit = semaphore.acquire().await?;
    transpile(ctx, job).await
  }))
  .await
}
