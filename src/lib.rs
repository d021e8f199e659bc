//! Streaming SHA-256, SHA-1 and MD5 digests of a single file.
//!
//! The file is read once, in fixed-size chunks, and every chunk feeds all
//! three hashes. Results always come back in the order SHA-256, SHA-1, MD5
//! as lowercase hex.

pub mod bridge;
pub mod error;
pub mod file_ops;
pub mod hashers;
pub mod models;
pub mod pipeline;
pub mod selection;
pub mod utils;

pub use bridge::{compute_hash, compute_hash_blocking, compute_hash_command, compute_hash_with, HashOutcome, Invocation};
pub use error::{ErrorKind, HashError};
pub use models::{Algorithm, Digest, HashOptions, HashResult, DEFAULT_CHUNK_SIZE};
pub use selection::Selection;
