//! Host wiring for the `shardcode` binary.
//!
//! - [`config`] - CLI/env settings validated into an [`AppConfig`].
//! - [`telemetry`] - `tracing` subscriber setup.
//! - [`commands`] - the `plan`, `generate` and `decode` subcommands.
//!
//! [`AppConfig`]: config::AppConfig

pub mod commands;
pub mod config;
pub mod telemetry;
