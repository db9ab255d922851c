use anyhow::Result;
use clap::Parser;
use hashperf::{run, Args};

fn main() -> Result<()> {
    run(Args::parse())
}
