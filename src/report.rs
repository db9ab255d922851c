//! Sinks for benchmark results.

use crate::utils::{format_window, Logger};
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;

/// Outcome of one benchmark window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub label: String,
    pub count: u64,
    /// The configured window, not the measured elapsed time
    pub window: Duration,
}

impl BenchmarkResult {
    pub fn line(&self) -> String {
        format!(
            "{} performance is: {}/{}s",
            self.label,
            self.count,
            format_window(self.window)
        )
    }
}

pub trait Reporter {
    fn report(&mut self, result: &BenchmarkResult) -> Result<()>;
}

/// Writes one line per result to any `Write` sink (stdout by default).
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, result: &BenchmarkResult) -> Result<()> {
        writeln!(self.out, "{}", result.line()).context("Failed to write result")?;
        self.out.flush()?;
        Ok(())
    }
}

impl Reporter for Logger {
    fn report(&mut self, result: &BenchmarkResult) -> Result<()> {
        self.log(&format!("Result: {}", result.line()))
    }
}

/// Sends every result to both reporters, `A` first.
pub struct Tee<A, B>(pub A, pub B);

impl<A: Reporter, B: Reporter> Reporter for Tee<A, B> {
    fn report(&mut self, result: &BenchmarkResult) -> Result<()> {
        self.0.report(result)?;
        self.1.report(result)
    }
}
