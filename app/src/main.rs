// storefront/app/src/main.rs

mod cli;
mod commands;
mod config;
mod errors;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};

use anyhow::Context;
use clap::Parser;
use storefront::{FileStore, SeedPolicy, Storefront};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let mut config = AppConfig::from_env().context("Failed to load application configuration")?;
  if let Some(dir) = cli.data_dir.clone() {
    config.data_dir = dir;
  }
  config.log_json |= cli.log_json;

  init_tracing(config.log_json);
  tracing::info!(data_dir = %config.data_dir.display(), seed = config.seed, "Application configuration loaded.");

  match run(cli, &config) {
    Ok(()) => Ok(()),
    Err(e) if e.is_rejection() => {
      tracing::warn!(error = %e, "Command rejected.");
      eprintln!("{e}");
      std::process::exit(1);
    }
    Err(e) => Err(e).context("storefront command failed"),
  }
}

fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
  let store = FileStore::open(&config.data_dir).map_err(|source| AppError::DataDir {
    path: config.data_dir.clone(),
    source,
  })?;
  let seed = if config.seed { SeedPolicy::SampleData } else { SeedPolicy::Empty };
  let mut sf = Storefront::open(store, seed)?;

  if let Some(username) = &cli.user {
    sf.login(username)?;
  }
  commands::run(&mut sf, cli.command)
}

// Logs go to stderr; stdout carries command output only.
fn init_tracing(json: bool) {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::WARN.into())
    .from_env_lossy(); // Allow RUST_LOG override
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}
