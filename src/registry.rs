//! Long-lived digest states, one per algorithm, cloned for every use.

use anyhow::{anyhow, bail, Result};
use blake2::{Blake2b512, Blake2s256};
use md4::Md4;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use sm3::Sm3;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md4,
    Md5,
    Sha1,
    Sha256,
    Sm3,
    Blake2b512,
    Blake2s256,
}

/// Every supported algorithm, in benchmark order.
pub const ALGORITHMS: [HashAlgorithm; 7] = [
    HashAlgorithm::Md4,
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sm3,
    HashAlgorithm::Blake2b512,
    HashAlgorithm::Blake2s256,
];

impl HashAlgorithm {
    pub fn label(&self) -> &'static str {
        match self {
            HashAlgorithm::Md4 => "MD4",
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sm3 => "SM3",
            HashAlgorithm::Blake2b512 => "BLAKE2b512",
            HashAlgorithm::Blake2s256 => "BLAKE2s256",
        }
    }

    fn create_state(&self) -> Box<dyn DigestState> {
        match self {
            HashAlgorithm::Md4 => Box::new(Md4::new()),
            HashAlgorithm::Md5 => Box::new(Md5::new()),
            HashAlgorithm::Sha1 => Box::new(Sha1::new()),
            HashAlgorithm::Sha256 => Box::new(Sha256::new()),
            HashAlgorithm::Sm3 => Box::new(Sm3::new()),
            HashAlgorithm::Blake2b512 => Box::new(Blake2b512::new()),
            HashAlgorithm::Blake2s256 => Box::new(Blake2s256::new()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept "BLAKE2b-512" as well as "BLAKE2b512"
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        ALGORITHMS
            .iter()
            .copied()
            .find(|algo| algo.label().to_ascii_uppercase() == normalized)
            .ok_or_else(|| anyhow!("unsupported algorithm: {}", s))
    }
}

/// A hash computation in progress.
pub trait DigestState {
    fn feed(&mut self, data: &[u8]);
    fn finalize(self: Box<Self>) -> Vec<u8>;
    fn box_clone(&self) -> Box<dyn DigestState>;
}

impl<D> DigestState for D
where
    D: Digest + Clone + 'static,
{
    fn feed(&mut self, data: &[u8]) {
        Digest::update(self, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(*self).to_vec()
    }

    fn box_clone(&self) -> Box<dyn DigestState> {
        Box::new(self.clone())
    }
}

/// Holds one pristine state per algorithm, in registration order.
pub struct Registry {
    entries: Vec<(HashAlgorithm, Box<dyn DigestState>)>,
}

impl Registry {
    pub fn new(algorithms: &[HashAlgorithm]) -> Result<Self> {
        let mut entries: Vec<(HashAlgorithm, Box<dyn DigestState>)> =
            Vec::with_capacity(algorithms.len());
        for &algo in algorithms {
            if entries.iter().any(|(existing, _)| *existing == algo) {
                bail!("duplicate algorithm: {}", algo);
            }
            entries.push((algo, algo.create_state()));
        }
        Ok(Self { entries })
    }

    /// Parses every name first so an unknown one fails before any state exists.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let algorithms = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<HashAlgorithm>>>()?;
        Self::new(&algorithms)
    }

    /// Returns an independent copy of the pristine state for `algo`.
    pub fn fork(&self, algo: HashAlgorithm) -> Option<Box<dyn DigestState>> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == algo)
            .map(|(_, state)| state.box_clone())
    }

    pub fn algorithms(&self) -> impl Iterator<Item = HashAlgorithm> + '_ {
        self.entries.iter().map(|(algo, _)| *algo)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (HashAlgorithm, &dyn DigestState)> + '_ {
        self.entries
            .iter()
            .map(|(algo, state)| (*algo, state.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Clone, feed, finalize: one benchmark iteration.
pub fn digest_with(state: &dyn DigestState, data: &[u8]) -> Vec<u8> {
    let mut fresh = state.box_clone();
    fresh.feed(data);
    fresh.finalize()
}
