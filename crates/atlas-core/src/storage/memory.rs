//! In-memory persistence
//!
//! Keeps the serialized snapshot in a string. Goes through the same JSON
//! encoding as the file adapter, so a round trip behaves identically.

use super::error::{StorageError, StorageResult};
use super::Persistence;
use crate::models::Board;

/// Persistence adapter that never touches the filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    contents: Option<String>,
    saves: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-serialized snapshot
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            saves: 0,
        }
    }

    /// The last saved document, if any
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> StorageResult<Option<Board>> {
        match &self.contents {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(StorageError::InvalidSnapshot),
            None => Ok(None),
        }
    }

    fn save(&mut self, board: &Board) -> StorageResult<()> {
        self.contents = Some(serde_json::to_string(board).map_err(StorageError::Encode)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_loads_none() {
        let persistence = MemoryPersistence::new();
        assert!(persistence.load().unwrap().is_none());
        assert_eq!(persistence.save_count(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut persistence = MemoryPersistence::new();
        let mut board = Board::new("In memory");
        board.available_tags.push("work".to_string());

        persistence.save(&board).unwrap();
        assert_eq!(persistence.save_count(), 1);
        assert!(persistence.contents().unwrap().contains("\"boardTitle\""));
        assert_eq!(persistence.load().unwrap().unwrap(), board);
    }

    #[test]
    fn test_with_contents() {
        let persistence = MemoryPersistence::with_contents(
            r#"{"boardTitle":"Imported","columns":[],"availableTags":["a"]}"#,
        );
        let board = persistence.load().unwrap().unwrap();
        assert_eq!(board.title, "Imported");
        assert_eq!(board.available_tags, vec!["a"]);
    }

    #[test]
    fn test_invalid_contents_error() {
        let persistence = MemoryPersistence::with_contents("nope");
        let err = persistence.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidSnapshot(_)));
    }
}
