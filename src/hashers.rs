use crate::models::{Algorithm, Digest};
use sha1::{Digest as Sha1Digest, Sha1};
use sha2::{Digest as Sha2Digest, Sha256};

/// Incremental hash state for one algorithm.
///
/// `absorb` may be called any number of times with slices of any length; the
/// final digest depends only on the concatenated bytes. `finalize` consumes
/// the accumulator, so nothing can be absorbed after it.
pub trait DigestAccumulator: Send {
    fn algorithm(&self) -> Algorithm;

    fn absorb(&mut self, chunk: &[u8]);

    fn bytes_absorbed(&self) -> u64;

    fn finalize(self) -> Digest
    where
        Self: Sized;
}

pub struct Sha256Accumulator {
    inner: Sha256,
    absorbed: u64,
}

impl Sha256Accumulator {
    pub fn new() -> Self {
        Sha256Accumulator { inner: Sha256::new(), absorbed: 0 }
    }
}

impl Default for Sha256Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestAccumulator for Sha256Accumulator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sha256
    }

    fn absorb(&mut self, chunk: &[u8]) {
        Sha2Digest::update(&mut self.inner, chunk);
        self.absorbed += chunk.len() as u64;
    }

    fn bytes_absorbed(&self) -> u64 {
        self.absorbed
    }

    fn finalize(self) -> Digest {
        Digest::new(Algorithm::Sha256, Sha2Digest::finalize(self.inner).to_vec())
    }
}

pub struct Sha1Accumulator {
    inner: Sha1,
    absorbed: u64,
}

impl Sha1Accumulator {
    pub fn new() -> Self {
        Sha1Accumulator { inner: Sha1::new(), absorbed: 0 }
    }
}

impl Default for Sha1Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestAccumulator for Sha1Accumulator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sha1
    }

    fn absorb(&mut self, chunk: &[u8]) {
        Sha1Digest::update(&mut self.inner, chunk);
        self.absorbed += chunk.len() as u64;
    }

    fn bytes_absorbed(&self) -> u64 {
        self.absorbed
    }

    fn finalize(self) -> Digest {
        Digest::new(Algorithm::Sha1, Sha1Digest::finalize(self.inner).to_vec())
    }
}

pub struct Md5Accumulator {
    ctx: md5::Context,
    absorbed: u64,
}

impl Md5Accumulator {
    pub fn new() -> Self {
        Md5Accumulator { ctx: md5::Context::new(), absorbed: 0 }
    }
}

impl Default for Md5Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestAccumulator for Md5Accumulator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Md5
    }

    fn absorb(&mut self, chunk: &[u8]) {
        self.ctx.consume(chunk);
        self.absorbed += chunk.len() as u64;
    }

    fn bytes_absorbed(&self) -> u64 {
        self.absorbed
    }

    fn finalize(self) -> Digest {
        Digest::new(Algorithm::Md5, self.ctx.finalize().0.to_vec())
    }
}

/// The three accumulators of one run. Every chunk goes to all of them, in order.
pub struct AccumulatorSet {
    sha256: Sha256Accumulator,
    sha1: Sha1Accumulator,
    md5: Md5Accumulator,
}

impl AccumulatorSet {
    pub fn new() -> Self {
        AccumulatorSet {
            sha256: Sha256Accumulator::new(),
            sha1: Sha1Accumulator::new(),
            md5: Md5Accumulator::new(),
        }
    }

    pub fn absorb(&mut self, chunk: &[u8]) {
        self.sha256.absorb(chunk);
        self.sha1.absorb(chunk);
        self.md5.absorb(chunk);
    }

    pub fn bytes_absorbed(&self) -> u64 {
        debug_assert_eq!(self.sha256.bytes_absorbed(), self.sha1.bytes_absorbed());
        debug_assert_eq!(self.sha256.bytes_absorbed(), self.md5.bytes_absorbed());
        self.sha256.bytes_absorbed()
    }

    /// Digests in `Algorithm::ALL` order.
    pub fn finalize(self) -> [Digest; 3] {
        [self.sha256.finalize(), self.sha1.finalize(), self.md5.finalize()]
    }
}

impl Default for AccumulatorSet {
    fn default() -> Self {
        Self::new()
    }
}
