//! Entry points for callers that must not block on file I/O.
//!
//! Hashing always runs on tokio's blocking pool, so an async caller (a UI
//! event loop, the CLI) just awaits the result. Nothing here keeps state
//! between calls; each invocation owns its own reader and accumulators.

use crate::error::HashError;
use crate::models::{HashOptions, HashResult};
use crate::pipeline::HashPipeline;
use std::path::{Path, PathBuf};
use tokio::task::{self, JoinHandle};
use tokio_util::sync::{CancellationToken, DropGuard};
use uuid::Uuid;

/// Synchronous form; call it from a blocking context.
pub fn compute_hash_blocking(path: &Path, options: &HashOptions) -> Result<HashResult, HashError> {
    compute_cancellable(path, options, None)
}

fn compute_cancellable(
    path: &Path,
    options: &HashOptions,
    cancel: Option<CancellationToken>,
) -> Result<HashResult, HashError> {
    let mut pipeline = HashPipeline::open(path, options)?;
    if let Some(token) = cancel {
        pipeline = pipeline.with_cancellation(token);
    }
    let digests = pipeline.run()?;
    Ok(HashResult::from_digests(&digests))
}

/// Hash `path` with default options off the calling task.
pub async fn compute_hash(path: impl Into<PathBuf>) -> Result<HashResult, HashError> {
    compute_hash_with(path, HashOptions::default()).await
}

pub async fn compute_hash_with(path: impl Into<PathBuf>, options: HashOptions) -> Result<HashResult, HashError> {
    spawn(path, options).outcome().await.result
}

/// Flattened boundary form: `[sha256, sha1, md5]` or a printable message.
pub async fn compute_hash_command(path: String) -> Result<[String; 3], String> {
    compute_hash(path)
        .await
        .map(HashResult::into_array)
        .map_err(|e| e.to_string())
}

/// Start hashing `path` in the background.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn spawn(path: impl Into<PathBuf>, options: HashOptions) -> Invocation {
    let path = path.into();
    let worker_path = path.clone();
    spawn_job(path, move |token| compute_cancellable(&worker_path, &options, Some(token)))
}

fn spawn_job<F>(path: PathBuf, job: F) -> Invocation
where
    F: FnOnce(CancellationToken) -> Result<HashResult, HashError> + Send + 'static,
{
    let token = CancellationToken::new();
    let worker_token = token.clone();
    let handle = task::spawn_blocking(move || job(worker_token));
    Invocation {
        id: Uuid::new_v4(),
        path,
        token: token.clone(),
        guard: token.drop_guard(),
        handle,
    }
}

/// A running hash of one file, tagged with the path it was started for.
///
/// Dropping it cancels the run; the worker then releases the file at its
/// next chunk boundary.
pub struct Invocation {
    id: Uuid,
    path: PathBuf,
    token: CancellationToken,
    guard: DropGuard,
    handle: JoinHandle<Result<HashResult, HashError>>,
}

/// What an invocation produced, still tagged for correlation.
#[derive(Debug)]
pub struct HashOutcome {
    pub id: Uuid,
    pub path: PathBuf,
    pub result: Result<HashResult, HashError>,
}

impl Invocation {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cooperative: the worker stops before its next read.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub async fn outcome(self) -> HashOutcome {
        let Invocation { id, path, token: _, guard, handle } = self;
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(HashError::Worker { path: path.clone(), reason: e.to_string() }),
        };
        // Finished normally; nothing left to cancel.
        guard.disarm();
        HashOutcome { id, path, result }
    }
}
