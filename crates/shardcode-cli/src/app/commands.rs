use std::io::Write;

use anyhow::Context;
use shardcode::{
    CodeParser, CounterGroup, DistributedGenerator, Formatter, LocalCounter,
    RngPicker, TransformedCounter,
};
use tracing::{debug, info};

use super::config::{AppConfig, Command, counter_name};

pub fn run(config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Plan => plan(config, out),
        Command::Generate { count } => generate(config, *count, out),
        Command::Decode { codes } => decode(config, codes, out),
    }
}

/// One line per shard: name, namespace, chunk capacity and the longest code
/// the shard can produce.
fn plan(config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let layout = &config.layout;
    for index in 0..layout.shard_count() {
        let start = layout.offset(index);
        let last = start + (layout.range() - 1);
        writeln!(
            out,
            "{}\t[{start}, {last}]\tchunks={}\tmax_code={}",
            counter_name(index),
            layout.max_chunks_per_shard(),
            config.radix.format(last),
        )?;
    }
    Ok(())
}

/// Runs the generator over one in-process counter per shard.
///
/// The counters start from zero on every run, so the codes are what a fresh
/// deployment would hand out first.
fn generate(config: &AppConfig, count: usize, out: &mut impl Write) -> anyhow::Result<()> {
    let layout = &config.layout;
    let shards: Vec<_> = (0..layout.shard_count())
        .map(|index| {
            debug!(
                counter = %counter_name(index),
                offset = layout.offset(index),
                "Shard ready"
            );
            TransformedCounter::new(LocalCounter::new(), layout.transformer(index))
        })
        .collect();

    let picker = match config.seed {
        Some(seed) => RngPicker::seeded(seed),
        None => RngPicker::from_os_rng(),
    };

    let generator =
        DistributedGenerator::new(layout.chunk_size(), CounterGroup::new(shards, picker), config.radix);

    for _ in 0..count {
        writeln!(out, "{}", generator.try_generate_code()?)?;
    }

    info!(count, "Generated codes");
    Ok(())
}

/// One line per code: the code, its integer value and its owning counter.
fn decode(config: &AppConfig, codes: &[String], out: &mut impl Write) -> anyhow::Result<()> {
    for code in codes {
        let value = config
            .radix
            .parse(code)
            .with_context(|| format!("unable to decode `{code}` in base {}", config.radix.base()))?;
        let owner = match config.layout.shard_of(value) {
            Some(index) => counter_name(index),
            None => String::from("outside every shard"),
        };
        writeln!(out, "{code}\t{value}\t{owner}")?;
    }
    Ok(())
}
