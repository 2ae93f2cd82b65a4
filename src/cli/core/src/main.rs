/* src/cli/core/src/main.rs */

mod build;
mod bundler;
mod clean;
mod config;
mod fs;
mod shell;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use build::context::BuildContext;
use build::locales::parse_locale_list;
use build::run::{ReleasePlan, run_build, run_custom, run_release};
use build::types::OutputFormat;
use config::resolve_config;

#[derive(Parser)]
#[command(name = "locale-transpile", about = "Bundle an ES module tree into UMD/ESM builds")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build every bundle for one output format
  Build {
    /// Path to transpile.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Umd)]
    format: OutputFormat,
  },
  /// Build locale aggregates for a hand-picked set of locales (UMD only)
  Custom {
    /// Path to transpile.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Comma-separated locale names, e.g. fr,de-at
    #[arg(short, long)]
    locales: String,
  },
  /// Clean, build every release format, concat tests, optional custom locales
  Release {
    /// Path to transpile.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Comma-separated locale names for the custom aggregates
    #[arg(short, long)]
    locales: Option<String>,
  },
  /// Remove the build output directory
  Clean {
    /// Path to transpile.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Config plus a disk-backed build context rooted at the config's directory.
fn load_context(explicit: Option<PathBuf>) -> Result<(config::TranspileConfig, BuildContext)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let (base_dir, config) = resolve_config(explicit.as_deref(), &cwd)?;
  let ctx = BuildContext::from_config(&config, &base_dir);
  Ok((config, ctx))
}

async fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Command::Build { config, format } => {
      let (config, ctx) = load_context(config)?;
      ui::banner("build", &config.project.name, Some(format.as_str()));
      let settings = &ctx.settings;
      ui::detail(&format!("batch size {} ({})", settings.batch_size, settings.batch_mode.as_str()));
      run_build(&ctx, format).await?;
    }
    Command::Custom { config, locales } => {
      let (config, ctx) = load_context(config)?;
      let names = parse_locale_list(&locales);
      ui::banner("custom", &config.project.name, Some(&names.join(",")));
      run_custom(&ctx, &names).await?;
    }
    Command::Release { config, locales } => {
      let (config, ctx) = load_context(config)?;
      let plan = ReleasePlan {
        formats: config.release.formats.clone(),
        concat_tests: config.release.concat_tests,
        locales: locales.as_deref().map(parse_locale_list).unwrap_or_default(),
      };
      let formats: Vec<&str> = plan.formats.iter().copied().map(OutputFormat::as_str).collect();
      ui::banner("release", &config.project.name, Some(&formats.join(",")));
      run_release(&ctx, &plan).await?;
    }
    Command::Clean { config } => {
      let (config, ctx) = load_context(config)?;
      ui::banner("clean", &config.project.name, None);
      clean::run_clean(&ctx)?;
    }
  }
  Ok(())
}

#[tokio::main]
async fn main() {
  if let Err(e) = run(Cli::parse()).await {
    ui::blank();
    ui::fail(&format!("{e:#}"));
    std::process::exit(1);
  }
}
