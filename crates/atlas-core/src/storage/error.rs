//! Storage errors
//!
//! Every failure carries the board file (or directory) it concerns so the
//! CLI can show it alongside a hint.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving a board snapshot
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot create board directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied on '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Ran out of disk space saving the board to '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read board file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write board file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Renaming the temp file over the board, or a corrupt board aside, failed
    #[error("Cannot move '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Board file failed to parse and was moved to `backup_path`
    #[error("Board at '{path}' is corrupted: {details}. It was moved to '{backup_path}'.")]
    CorruptDocument {
        path: PathBuf,
        backup_path: PathBuf,
        details: String,
    },

    /// Snapshot held outside the filesystem failed to parse
    #[error("Saved board is not a valid snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),

    #[error("Cannot encode board snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StorageError {
    /// Failure reading a board file
    pub(crate) fn reading(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => StorageError::Read {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Failure writing a board file, split out by what the user can do about it
    pub(crate) fn writing(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied { path, source }
        } else if is_disk_full(&source) {
            StorageError::DiskFull { path, source }
        } else {
            StorageError::Write { path, source }
        }
    }

    /// A hint the CLI prints under the error, when there is one
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check permissions on the data directory, or point data_dir somewhere writable with `atlas config set data_dir <PATH>`.")
            }
            StorageError::CorruptDocument { .. } => {
                Some("The next run starts from a fresh starter board. Cards can be copied back by hand from the backup.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and is writable.")
            }
            _ => None,
        }
    }
}

fn is_disk_full(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left") || msg.contains("disk full") || msg.contains("quota exceeded")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_classification() {
        let path = Path::new("/data/board.json");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::reading(path, denied);
        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.recovery_suggestion().unwrap().contains("data_dir"));

        let other = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err = StorageError::reading(path, other);
        assert!(matches!(err, StorageError::Read { .. }));
        assert!(err.recovery_suggestion().is_none());
    }

    #[test]
    fn test_writing_classification() {
        let path = Path::new("/full/board.tmp");

        let full = io::Error::new(io::ErrorKind::Other, "No space left on device");
        assert!(matches!(
            StorageError::writing(path, full),
            StorageError::DiskFull { .. }
        ));

        let broken = io::Error::new(io::ErrorKind::Other, "broken pipe");
        let err = StorageError::writing(path, broken);
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(err.to_string().contains("/full/board.tmp"));
    }

    #[test]
    fn test_corrupt_document_display() {
        let err = StorageError::CorruptDocument {
            path: PathBuf::from("/data/board.json"),
            backup_path: PathBuf::from("/data/board.json.corrupt.backup"),
            details: "expected value at line 1 column 1".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("corrupted"));
        assert!(msg.contains("board.json.corrupt.backup"));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_invalid_snapshot_names_parsing() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let msg = StorageError::InvalidSnapshot(source).to_string();
        assert!(msg.starts_with("Saved board is not a valid snapshot"));
    }
}
