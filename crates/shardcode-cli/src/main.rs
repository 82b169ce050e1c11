#![doc = include_str!("../README.md")]

mod app;

use app::commands::run;
use app::config::{AppConfig, CliArgs};
use app::telemetry::init_telemetry;
use clap::Parser;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_telemetry(config.log_format)?;
    log_startup_info(&config);

    let stdout = std::io::stdout();
    run(&config, &mut stdout.lock())
}

fn log_startup_info(config: &AppConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting with full config: {:#?}", config);
    } else {
        tracing::info!(
            shards = config.layout.shard_count(),
            chunk_size = config.layout.chunk_size(),
            radix = config.radix.base(),
            "Starting"
        );
    }
}
