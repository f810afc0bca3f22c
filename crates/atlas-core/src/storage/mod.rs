//! Storage layer
//!
//! Persistence adapters load and save an opaque board snapshot. The store
//! never calls them itself; the host decides when to persist (see `Session`).
//!
//! ## Adapters
//!
//! - **JSON file**: Source of truth on disk, written atomically
//! - **Memory**: Serialized snapshot held in a string, for tests and embedding

pub mod error;
pub mod memory;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryPersistence;
pub use persistence::JsonFilePersistence;

use crate::models::Board;

/// Loads and saves board snapshots
pub trait Persistence {
    /// Load the saved snapshot
    ///
    /// Returns `None` if nothing has been saved yet.
    fn load(&self) -> StorageResult<Option<Board>>;

    /// Save a snapshot, replacing whatever was stored
    fn save(&mut self, board: &Board) -> StorageResult<()>;
}
