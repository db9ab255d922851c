pub mod bench;
pub mod clock;
pub mod registry;
pub mod report;
pub mod runner;
pub mod source;
pub mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;

use bench::{BenchConfig, Benchmark};
use registry::{HashAlgorithm, ALGORITHMS};
use report::{BenchmarkResult, ConsoleReporter, Tee};
use source::{RefillMode, BUFFER_SIZE};
use utils::{format_bytes, format_window, Logger};

fn default_algorithm_names() -> Vec<String> {
    ALGORITHMS.iter().map(|algo| algo.label().to_string()).collect()
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Duration of each benchmark window in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub window_ms: u64,

    /// Size of the source buffer in bytes
    #[arg(long, default_value_t = BUFFER_SIZE)]
    pub buffer_size: usize,

    /// Comma-separated digest algorithms to benchmark, in order
    #[arg(long, value_delimiter = ',', default_values_t = default_algorithm_names())]
    pub algorithms: Vec<String>,

    /// Mutation primitive for the source buffer benchmark
    #[arg(long, value_enum, default_value_t = RefillMode::Byte)]
    pub refill: RefillMode,

    /// Audit log file path
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    /// Resolves algorithm names and limits into a typed configuration.
    /// Unknown algorithm names are rejected here, before anything runs.
    pub fn config(&self) -> Result<BenchConfig> {
        let algorithms = self
            .algorithms
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<HashAlgorithm>>>()
            .context("Invalid algorithm selection")?;

        Ok(BenchConfig {
            buffer_size: self.buffer_size,
            window: Duration::from_millis(self.window_ms),
            algorithms,
            refill: self.refill,
        })
    }
}

pub fn run(args: Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(&args, &mut out)?;
    Ok(())
}

/// Runs every benchmark, writing result lines to `out`.
pub fn run_with_output<W: Write>(args: &Args, out: &mut W) -> Result<Vec<BenchmarkResult>> {
    let config = args.config()?;
    let mut bench = Benchmark::new(&config)?;

    let Some(log_path) = &args.log else {
        return bench.run_all(&mut ConsoleReporter::new(out));
    };
    let logger = Logger::new(log_path);

    let names: Vec<&str> = config.algorithms.iter().map(|algo| algo.label()).collect();
    logger.log(&format!(
        "Starting benchmark: buffer {}, window {}s, refill {:?}, algorithms [{}]",
        format_bytes(config.buffer_size as u64),
        format_window(config.window),
        config.refill,
        names.join(", ")
    ))?;

    let mut reporter = Tee(ConsoleReporter::new(out), logger);
    let results = bench.run_all(&mut reporter)?;
    let Tee(_, logger) = reporter;

    for (algo, digest) in bench.sample_digests() {
        logger.log(&format!("Sample digest {}: {}", algo, digest))?;
    }
    logger.log("Benchmark completed.")?;

    Ok(results)
}
