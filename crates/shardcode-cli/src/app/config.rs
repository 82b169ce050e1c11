use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use shardcode::{Radix, ShardLayout};

/// Runtime configuration for the `shardcode` binary.
///
/// The shard settings mirror what a service embedding the generator reads at
/// startup: how many counter shards exist, how many values each claim
/// reserves, and how large each shard's namespace is. All values are parsed
/// from CLI arguments or environment variables (a `.env` file is loaded
/// first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shardcode",
    version,
    about = "Plan shard layouts, generate and decode short codes"
)]
pub struct CliArgs {
    /// Number of counter shards.
    ///
    /// Each shard is a separately named sequence in the counter service
    /// (`distributed-counter-0`, `distributed-counter-1`, ...). More shards
    /// spread claims across more keys.
    ///
    /// Environment variable: `COUNTER_COUNT`
    #[arg(long, env = "COUNTER_COUNT", default_value_t = 2)]
    pub counter_count: usize,

    /// Number of codes reserved by a single claim.
    ///
    /// Larger chunks mean fewer round trips to the counter service, and a
    /// larger gap of unused codes whenever a process restarts.
    ///
    /// Environment variable: `COUNTER_CHUNK`
    #[arg(long, env = "COUNTER_CHUNK", default_value_t = 1000)]
    pub counter_chunk: u64,

    /// Size of each shard's namespace.
    ///
    /// Shard `i` owns the values `[i × range, (i + 1) × range)`.
    ///
    /// Environment variable: `COUNTER_RANGE`
    #[arg(long, env = "COUNTER_RANGE", default_value_t = 1_000_000_000)]
    pub counter_range: u64,

    /// Radix of the printed codes, between 2 and 62.
    ///
    /// Environment variable: `CODE_RADIX`
    #[arg(long, env = "CODE_RADIX", default_value_t = 62)]
    pub code_radix: u32,

    /// Fixed seed for shard selection. Uses OS entropy when unset.
    ///
    /// Environment variable: `SHARD_SEED`
    #[arg(long, env = "SHARD_SEED")]
    pub seed: Option<u64>,

    /// Log output format.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every shard's counter name, namespace and chunk capacity.
    Plan,

    /// Generate codes from in-process counters.
    Generate {
        /// Number of codes to print.
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },

    /// Parse codes back into integers and report their owning shard.
    Decode {
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub layout: ShardLayout,
    pub radix: Radix,
    pub seed: Option<u64>,
    pub log_format: LogFormat,
    pub command: Command,
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let layout = ShardLayout::new(args.counter_count, args.counter_chunk, args.counter_range)
            .with_context(|| {
                format!(
                    "invalid shard layout (COUNTER_COUNT={}, COUNTER_CHUNK={}, COUNTER_RANGE={})",
                    args.counter_count, args.counter_chunk, args.counter_range
                )
            })?;

        let radix = Radix::new(args.code_radix).context("invalid CODE_RADIX")?;

        Ok(Self {
            layout,
            radix,
            seed: args.seed,
            log_format: args.log_format,
            command: args.command,
        })
    }
}

/// Name of shard `index`'s sequence in the counter service.
pub fn counter_name(index: usize) -> String {
    format!("distributed-counter-{index}")
}
