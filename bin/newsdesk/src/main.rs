//! # Newsdesk Binary
//!
//! The entry point that assembles the store based on configuration and
//! compile-time features, then runs one command.

mod commands;

use clap::Parser;
use nd_config::{AppConfig, Backend, LogFormat, LoggingConfig};
use nd_core::traits::SlotStore;
use nd_core::MemorySlots;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// Feature-gated imports
#[cfg(feature = "slots-fs")]
use nd_slots_fs::FileSlots;

/// Newsdesk: manage the articles, comments and analytics behind the portal.
#[derive(Debug, Parser)]
#[command(name = "newsdesk", version)]
struct Cli {
    /// Configuration file (defaults to ./newsdesk.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: commands::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let slots = open_slots(&config)?;
    let ok = commands::run(cli.cmd, config, slots).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn open_slots(config: &AppConfig) -> anyhow::Result<Arc<dyn SlotStore>> {
    match config.storage.backend {
        Backend::Memory => {
            tracing::warn!("memory backend selected; nothing will outlive this command");
            Ok(Arc::new(MemorySlots::new()))
        }
        #[cfg(feature = "slots-fs")]
        Backend::Files => Ok(Arc::new(FileSlots::open(&config.storage.data_dir)?)),
        #[cfg(not(feature = "slots-fs"))]
        Backend::Files => anyhow::bail!("built without the `slots-fs` feature; use storage.backend = \"memory\""),
    }
}
