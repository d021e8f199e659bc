use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    IoFailure,
    Cancelled,
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied while opening {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error while {operation} {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("hashing of {} was cancelled", .path.display())]
    Cancelled { path: PathBuf },

    #[error("hashing task for {} failed: {reason}", .path.display())]
    Worker { path: PathBuf, reason: String },
}

impl HashError {
    /// Classify a failure from `File::open`.
    pub fn from_open(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            // A parent component that is a plain file means the path cannot resolve either.
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => HashError::NotFound { path: path.to_path_buf() },
            io::ErrorKind::PermissionDenied => HashError::PermissionDenied { path: path.to_path_buf() },
            _ => HashError::Io {
                path: path.to_path_buf(),
                operation: "opening",
                source: err,
            },
        }
    }

    /// Any failure after the file was opened is an I/O failure, whatever its kind.
    pub fn from_read(err: io::Error, path: &Path) -> Self {
        HashError::Io {
            path: path.to_path_buf(),
            operation: "reading",
            source: err,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HashError::NotFound { .. } => ErrorKind::NotFound,
            HashError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            HashError::Io { .. } | HashError::Worker { .. } => ErrorKind::IoFailure,
            HashError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            HashError::NotFound { path }
            | HashError::PermissionDenied { path }
            | HashError::Io { path, .. }
            | HashError::Cancelled { path }
            | HashError::Worker { path, .. } => path,
        }
    }
}
