//! Sequences the mutation benchmark and one digest benchmark per algorithm.

use crate::clock::{Clock, MonotonicClock};
use crate::registry::{digest_with, HashAlgorithm, Registry, ALGORITHMS};
use crate::report::{BenchmarkResult, Reporter};
use crate::runner::run_for;
use crate::source::{RefillMode, SourceBuffer, BUFFER_SIZE};
use anyhow::Result;
use std::time::Duration;

pub const WINDOW: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub buffer_size: usize,
    pub window: Duration,
    pub algorithms: Vec<HashAlgorithm>,
    pub refill: RefillMode,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
            window: WINDOW,
            algorithms: ALGORITHMS.to_vec(),
            refill: RefillMode::Byte,
        }
    }
}

pub struct Benchmark<C: Clock = MonotonicClock> {
    clock: C,
    source: SourceBuffer,
    registry: Registry,
    window: Duration,
    refill: RefillMode,
}

impl Benchmark<MonotonicClock> {
    pub fn new(config: &BenchConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> Benchmark<C> {
    pub fn with_clock(config: &BenchConfig, clock: C) -> Result<Self> {
        let registry = Registry::new(&config.algorithms)?;
        let source = SourceBuffer::new(config.buffer_size)?;
        Ok(Self::from_parts(
            clock,
            source,
            registry,
            config.window,
            config.refill,
        ))
    }

    pub fn from_parts(
        clock: C,
        source: SourceBuffer,
        registry: Registry,
        window: Duration,
        refill: RefillMode,
    ) -> Self {
        Self {
            clock,
            source,
            registry,
            window,
            refill,
        }
    }

    /// Runs every benchmark in order, reporting each result as soon as its
    /// window closes. The first error aborts the run.
    pub fn run_all(&mut self, reporter: &mut dyn Reporter) -> Result<Vec<BenchmarkResult>> {
        let mut results = Vec::with_capacity(self.registry.len() + 1);

        let mutation = self.run_mutation();
        reporter.report(&mutation)?;
        results.push(mutation);

        for (algo, state) in self.registry.entries() {
            let data = self.source.as_bytes();
            let count = run_for(&self.clock, self.window, || digest_with(state, data));

            let result = BenchmarkResult {
                label: algo.label().to_string(),
                count,
                window: self.window,
            };
            reporter.report(&result)?;
            results.push(result);
        }

        Ok(results)
    }

    fn run_mutation(&mut self) -> BenchmarkResult {
        let refill = self.refill;
        let count = run_for(&self.clock, self.window, || self.source.mutate(refill));

        BenchmarkResult {
            label: refill.label().to_string(),
            count,
            window: self.window,
        }
    }

    /// Hex digest of the current buffer for every registered algorithm.
    pub fn sample_digests(&self) -> Vec<(HashAlgorithm, String)> {
        self.registry
            .entries()
            .map(|(algo, state)| {
                let digest = digest_with(state, self.source.as_bytes());
                (algo, hex::encode(digest))
            })
            .collect()
    }

    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::report::ConsoleReporter;

    fn manual_benchmark(
        algorithms: &[HashAlgorithm],
        refill: RefillMode,
    ) -> Result<Benchmark<ManualClock>> {
        Ok(Benchmark::from_parts(
            ManualClock::new(Duration::from_millis(1)),
            SourceBuffer::with_seed(1024, 11)?,
            Registry::new(algorithms)?,
            Duration::from_millis(10),
            refill,
        ))
    }

    #[test]
    fn test_results_in_registration_order() -> Result<()> {
        let mut bench = manual_benchmark(
            &[HashAlgorithm::Sha256, HashAlgorithm::Md5],
            RefillMode::Byte,
        )?;
        let mut reporter = ConsoleReporter::new(Vec::new());

        let results = bench.run_all(&mut reporter)?;

        let labels: Vec<_> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["refreshRandomSource", "SHA256", "MD5"]);
        for result in &results {
            // 1ms per clock reading, 10ms window
            assert_eq!(result.count, 9);
            assert_eq!(result.window, Duration::from_millis(10));
        }

        let out = String::from_utf8(reporter.into_inner())?;
        assert_eq!(
            out,
            "refreshRandomSource performance is: 9/0.01s\n\
             SHA256 performance is: 9/0.01s\n\
             MD5 performance is: 9/0.01s\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_registry_runs_mutation_only() -> Result<()> {
        let mut bench = manual_benchmark(&[], RefillMode::Byte)?;
        let mut reporter = ConsoleReporter::new(Vec::new());

        let results = bench.run_all(&mut reporter)?;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "refreshRandomSource");
        Ok(())
    }

    #[test]
    fn test_mutation_changes_content_not_length() -> Result<()> {
        let mut bench = manual_benchmark(&[], RefillMode::Byte)?;
        let results = bench.run_all(&mut ConsoleReporter::new(Vec::new()))?;

        let source = bench.source();
        assert_eq!(source.len(), 1024);
        let changed = source.as_bytes().iter().filter(|&&b| b != 0).count() as u64;
        assert!(changed <= results[0].count);
        Ok(())
    }

    #[test]
    fn test_full_refill_label() -> Result<()> {
        let mut bench = manual_benchmark(&[HashAlgorithm::Md4], RefillMode::Full)?;
        let results = bench.run_all(&mut ConsoleReporter::new(Vec::new()))?;
        assert_eq!(results[0].label, "fillRandomSource");
        assert_eq!(results[1].label, "MD4");
        Ok(())
    }

    #[test]
    fn test_sample_digests_follow_buffer() -> Result<()> {
        let bench = manual_benchmark(&[HashAlgorithm::Md5], RefillMode::Byte)?;
        let samples = bench.sample_digests();

        // MD5 of 1024 zero bytes
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].0, HashAlgorithm::Md5);
        assert_eq!(samples[0].1, "0f343b0931126a20f133d67c2b018a3b");
        Ok(())
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = BenchConfig::default();
        assert_eq!(config.buffer_size, 10 * 1024 * 1024);
        assert_eq!(config.window, Duration::from_millis(3000));
        assert_eq!(config.algorithms.len(), 7);
        assert_eq!(config.refill, RefillMode::Byte);
    }
}
