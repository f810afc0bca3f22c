//! JSON file persistence
//!
//! Saves the board snapshot as pretty-printed JSON. Uses atomic writes
//! (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/atlas/board.json` (configurable via `Config`)

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::{StorageError, StorageResult};
use super::Persistence;
use crate::config::Config;
use crate::models::Board;

/// Suffix appended to a snapshot file that failed to parse
const CORRUPT_BACKUP_SUFFIX: &str = "corrupt.backup";

/// Persistence adapter storing the board as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Create an adapter for a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create an adapter for the board file named by the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.board_path())
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a snapshot exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the snapshot file in bytes, if it exists
    pub fn file_size(&self) -> Option<u64> {
        fs::metadata(&self.path).ok().map(|meta| meta.len())
    }

    /// Move an unreadable snapshot aside so the next save starts clean
    fn back_up_corrupt(&self, details: String) -> StorageError {
        let backup_path = backup_path_for(&self.path);
        warn!(
            "Board snapshot at {:?} is corrupted ({}), moving it to {:?}",
            self.path, details, backup_path
        );

        if let Err(e) = fs::rename(&self.path, &backup_path) {
            return StorageError::Rename {
                from: self.path.clone(),
                to: backup_path,
                source: e,
            };
        }

        StorageError::CorruptDocument {
            path: self.path.clone(),
            backup_path,
            details,
        }
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> StorageResult<Option<Board>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| StorageError::reading(&self.path, e))?;

        match serde_json::from_str(&content) {
            Ok(board) => Ok(Some(board)),
            Err(e) => Err(self.back_up_corrupt(e.to_string())),
        }
    }

    fn save(&mut self, board: &Board) -> StorageResult<()> {
        let mut bytes = serde_json::to_vec_pretty(board).map_err(StorageError::Encode)?;
        bytes.push(b'\n');
        atomic_write(&self.path, &bytes)
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(CORRUPT_BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path).map_err(|e| StorageError::writing(&temp_path, e))?;
    file.write_all(data)
        .map_err(|e| StorageError::writing(&temp_path, e))?;
    file.sync_all()
        .map_err(|e| StorageError::writing(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::Rename {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
