//! The in-memory buffer that every benchmark reads or mutates.

use anyhow::{bail, Result};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub const BUFFER_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Which mutation primitive the first benchmark measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RefillMode {
    /// Overwrite one random byte per iteration
    #[default]
    Byte,
    /// Overwrite the whole buffer with random bytes per iteration
    Full,
}

impl RefillMode {
    pub fn label(&self) -> &'static str {
        match self {
            RefillMode::Byte => "refreshRandomSource",
            RefillMode::Full => "fillRandomSource",
        }
    }
}

/// Fixed-size zero-initialized byte buffer with in-place random mutation.
pub struct SourceBuffer {
    data: Vec<u8>,
    rng: StdRng,
}

impl SourceBuffer {
    pub fn new(size: usize) -> Result<Self> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Same as `new`, but with a reproducible random sequence.
    pub fn with_seed(size: usize, seed: u64) -> Result<Self> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, rng: StdRng) -> Result<Self> {
        if size == 0 {
            bail!("source buffer size must be greater than zero");
        }
        Ok(Self {
            data: vec![0u8; size],
            rng,
        })
    }

    /// Writes one random byte value at one random index.
    pub fn mutate_one_byte(&mut self) {
        let index = self.rng.gen_range(0..self.data.len());
        self.data[index] = self.rng.gen();
    }

    /// Overwrites every byte with random content.
    pub fn refill(&mut self) {
        self.rng.fill_bytes(&mut self.data);
    }

    pub fn mutate(&mut self, mode: RefillMode) {
        match mode {
            RefillMode::Byte => self.mutate_one_byte(),
            RefillMode::Full => self.refill(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
