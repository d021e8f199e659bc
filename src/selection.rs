//! Caller-side bookkeeping for "which file is the user looking at".
//!
//! The engine never remembers anything between calls. A presentation layer
//! that lets the user pick a new file while an older hash is still running
//! owns one `Selection` and routes every finished `HashOutcome` through
//! `accept`, which drops results that no longer match what is selected.

use crate::bridge::{self, HashOutcome, Invocation};
use crate::error::HashError;
use crate::models::{HashOptions, HashResult};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Selection {
    path: Option<PathBuf>,
    pending: Option<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Select `path` and start hashing it. Any earlier invocation becomes stale.
    pub fn select(&mut self, path: impl Into<PathBuf>, options: HashOptions) -> Invocation {
        let path = path.into();
        let invocation = bridge::spawn(path.clone(), options);
        self.path = Some(path);
        self.pending = Some(invocation.id());
        invocation
    }

    /// `Some` only for the outcome of the latest invocation on the selected path.
    pub fn accept(&mut self, outcome: HashOutcome) -> Option<Result<HashResult, HashError>> {
        let current = self.pending == Some(outcome.id) && self.path.as_deref() == Some(outcome.path.as_path());
        if !current {
            debug!(path = %outcome.path.display(), id = %outcome.id, "discarding stale result");
            return None;
        }
        self.pending = None;
        Some(outcome.result)
    }

    pub fn clear(&mut self) {
        self.path = None;
        self.pending = None;
    }
}
