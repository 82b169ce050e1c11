//! Log output for the `shardcode` binary.
//!
//! Events from the binary and from the `shardcode` library (shard claims,
//! claim failures) go to stderr, so stdout carries only command output.
//! Filtering follows `RUST_LOG` and defaults to `info`; set it to
//! `shardcode=debug` to see every claimed chunk.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::LogFormat;

pub fn init_telemetry(format: LogFormat) -> anyhow::Result<()> {
    let text = (format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_thread_ids(true)
            .with_target(false)
    });
    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(text)
        .with(json)
        .try_init()?;

    Ok(())
}
