/* src/cli/core/src/shell.rs */

// Subprocess helpers shared by the bundler and the locale probe.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Run `program args...` in `base_dir`, feed `stdin`, and return stdout.
/// Bails on a non-zero exit, showing both stderr and stdout.
pub(crate) async fn run_capture(
  base_dir: &Path,
  program: &str,
  args: &[&str],
  label: &str,
  stdin: Option<&str>,
) -> Result<String> {
  let mut cmd = Command::new(program);
  cmd.args(args);
  cmd.current_dir(base_dir);
  cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });
  cmd.stdout(Stdio::piped());
  cmd.stderr(Stdio::piped());
  cmd.kill_on_drop(true);

  let mut child = cmd.spawn().with_context(|| format!("failed to run {label}"))?;
  if let Some(input) = stdin
    && let Some(mut pipe) = child.stdin.take()
  {
    pipe
      .write_all(input.as_bytes())
      .await
      .with_context(|| format!("failed to write stdin of {label}"))?;
    // Closing stdin signals EOF to the child.
    drop(pipe);
  }

  let output = child.wait_with_output().await.with_context(|| format!("failed to run {label}"))?;
  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut msg = format!("{label} exited with status {}", output.status);
    if !stderr.is_empty() {
      msg.push('\n');
      msg.push_str(stderr.trim_end());
    }
    if !stdout.is_empty() {
      msg.push('\n');
      msg.push_str(stdout.trim_end());
    }
    bail!("{msg}");
  }
  String::from_utf8(output.stdout).with_context(|| format!("{label} produced non-UTF-8 output"))
}

/// Run a user-configured command line through `sh -c`.
pub(crate) async fn run_shell_capture(
  base_dir: &Path,
  command: &str,
  label: &str,
  stdin: Option<&str>,
) -> Result<String> {
  run_capture(base_dir, "sh", &["-c", command], label, stdin).await
}

/// Check if a command exists on PATH.
pub(crate) fn which_exists(cmd: &str) -> bool {
  std::process::Command::new("which")
    .arg(cmd)
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}
