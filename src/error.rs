use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The error type a [`Visitor`](crate::Visitor) reports failure with.
///
/// The walker does not interpret it beyond "nonzero": it is logged with the
/// offending path and, when the failure cannot be walked past, carried inside
/// [`WalkError::Visit`].
pub type VisitError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum WalkError {
    // Opening a directory scope
    #[error("permission denied opening {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Scanning a directory scope
    #[error("failed to read an entry of {}", .path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat {}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // The caller's capability
    #[error("visitor failed on {}", .path.display())]
    Visit {
        path: PathBuf,
        #[source]
        source: VisitError,
    },
}

impl WalkError {
    /// Classify a failed directory open by its error kind.
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Open {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub(crate) fn read_entry(path: &Path, source: io::Error) -> Self {
        Self::ReadEntry {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn stat(path: PathBuf, source: io::Error) -> Self {
        Self::Stat { path, source }
    }

    pub(crate) fn visit(path: PathBuf, source: VisitError) -> Self {
        Self::Visit { path, source }
    }

    /// The path this error occurred at.
    /// Callers use this to present "skipped: <path>" diagnostics without
    /// pattern matching on variants.
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) => p,
            Self::Open { path, .. }
            | Self::ReadEntry { path, .. }
            | Self::Stat { path, .. }
            | Self::Visit { path, .. } => path,
        }
    }

    /// Whether the directory scope that observed this error keeps walking.
    ///
    /// Visitor failures are recoverable: the scope logs them and moves to the
    /// next sibling.
    ///
    /// Open, read and stat failures abort the scope that hit them; only the
    /// parent scope absorbs the abandoned subtree and continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Visit { .. })
    }
}
