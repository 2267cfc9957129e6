use std::fs;
use std::path::PathBuf;

use crate::error::WalkError;

/// A single item discovered while scanning a directory.
///
/// Transient: the walker builds one per directory entry, dispatches on its
/// kind, and drops it before the next sibling is scanned. `path` is the
/// parent path joined with the entry name; no canonicalization is performed.
pub(crate) struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

impl Entry {
    /// Stat `path` (without following symlinks) and classify it.
    ///
    /// This is the metadata query of the scan loop: a failure here is fatal
    /// to the enclosing directory scope.
    pub fn classify(path: PathBuf) -> Result<Self, WalkError> {
        match fs::symlink_metadata(&path) {
            Ok(metadata) => Ok(Self {
                kind: EntryKind::from_file_type(metadata.file_type()),
                path,
            }),
            Err(source) => Err(WalkError::stat(path, source)),
        }
    }
}

/// The kind of a discovered entry.
///
/// Only `File` is visited and only `Dir` is recursed into. `Symlink` and
/// `Other` are skipped without either, so the walker never follows a link
/// found below the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    /// Map a filesystem file type onto the walker's kinds.
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            Self::File
        } else if file_type.is_dir() {
            Self::Dir
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}
