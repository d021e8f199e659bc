use serde::Serialize;
use std::fmt;

use crate::utils;

/// Default read size: 128 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 128 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha256,
    Sha1,
    Md5,
}

impl Algorithm {
    /// Contract order of every result this crate hands out.
    pub const ALL: [Algorithm; 3] = [Algorithm::Sha256, Algorithm::Sha1, Algorithm::Md5];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Md5 => "MD5",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Algorithm::Sha256 => 32,
            Algorithm::Sha1 => 20,
            Algorithm::Md5 => 16,
        }
    }

    pub fn hex_len(&self) -> usize {
        self.output_len() * 2
    }

    /// Position in `HashResult::into_array`.
    pub fn index(&self) -> usize {
        match self {
            Algorithm::Sha256 => 0,
            Algorithm::Sha1 => 1,
            Algorithm::Md5 => 2,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Finalized output of one accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    algorithm: Algorithm,
    bytes: Vec<u8>,
}

impl Digest {
    pub(crate) fn new(algorithm: Algorithm, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), algorithm.output_len());
        Digest { algorithm, bytes }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        utils::encode_digest(&self.bytes)
    }
}

/// The three hex digests of one file, always SHA-256, SHA-1, MD5 in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashResult {
    pub sha256: String,
    pub sha1: String,
    pub md5: String,
}

impl HashResult {
    pub fn from_digests(digests: &[Digest; 3]) -> Self {
        let [sha256, sha1, md5] = digests;
        debug_assert_eq!(sha256.algorithm(), Algorithm::Sha256);
        debug_assert_eq!(sha1.algorithm(), Algorithm::Sha1);
        debug_assert_eq!(md5.algorithm(), Algorithm::Md5);
        HashResult {
            sha256: sha256.to_hex(),
            sha1: sha1.to_hex(),
            md5: md5.to_hex(),
        }
    }

    pub fn get(&self, algorithm: Algorithm) -> &str {
        match algorithm {
            Algorithm::Sha256 => &self.sha256,
            Algorithm::Sha1 => &self.sha1,
            Algorithm::Md5 => &self.md5,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &str)> + '_ {
        Algorithm::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    pub fn into_array(self) -> [String; 3] {
        [self.sha256, self.sha1, self.md5]
    }
}

/// Per-run knobs. There is no config file; callers build this directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    pub chunk_size: usize,
}

impl HashOptions {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        HashOptions { chunk_size: chunk_size.max(1) }
    }
}

impl Default for HashOptions {
    fn default() -> Self {
        HashOptions { chunk_size: DEFAULT_CHUNK_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashResult {
        HashResult {
            sha256: "a".repeat(64),
            sha1: "b".repeat(40),
            md5: "c".repeat(32),
        }
    }

    #[test]
    fn algorithm_order_matches_result_positions() {
        let arr = sample().into_array();
        for algo in Algorithm::ALL {
            assert_eq!(arr[algo.index()].len(), algo.hex_len());
        }
    }

    #[test]
    fn iter_yields_contract_order() {
        let names: Vec<_> = sample().iter().map(|(a, _)| a.name()).collect();
        assert_eq!(names, ["SHA-256", "SHA-1", "MD5"]);
    }

    #[test]
    fn result_serializes_with_named_fields() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["sha1"].as_str().unwrap().len(), 40);
        assert_eq!(serde_json::to_value(Algorithm::Sha256).unwrap(), "sha256");
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        assert_eq!(HashOptions::with_chunk_size(0).chunk_size, 1);
        assert_eq!(HashOptions::default().chunk_size, 128 * 1024);
    }
}
