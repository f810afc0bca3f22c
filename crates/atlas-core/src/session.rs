//! Board session
//!
//! A `Session` is the host that pairs a `BoardStore` with a persistence
//! adapter. It runs commands against the store and saves the snapshot
//! afterwards, only when the command actually changed something.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::open_with_config(&config)?;  // Creates or loads
//!
//! session.execute(Command::AddTag { tag: "errands".into() })?;
//!
//! let board = session.snapshot();
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::command::Command;
use crate::config::Config;
use crate::models::Board;
use crate::storage::{JsonFilePersistence, Persistence};
use crate::store::BoardStore;

/// A board store bound to a persistence adapter
pub struct Session<P: Persistence> {
    store: BoardStore,
    persistence: P,
}

impl Session<JsonFilePersistence> {
    /// Open the board file from the default configuration
    pub fn open_default() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(&config)
    }

    /// Open the board file named by a configuration
    pub fn open_with_config(config: &Config) -> Result<Self> {
        Self::open(JsonFilePersistence::from_config(config))
    }
}

impl<P: Persistence> Session<P> {
    /// Open a session, loading the saved board or seeding a starter board
    ///
    /// On first run the starter board is saved immediately so the next
    /// run sees the same IDs.
    pub fn open(persistence: P) -> Result<Self> {
        match persistence.load().context("Failed to load board")? {
            Some(board) => {
                info!(
                    columns = board.columns.len(),
                    cards = board.card_count(),
                    "Loaded board"
                );
                Ok(Self::with_store(BoardStore::from_board(board), persistence))
            }
            None => {
                info!("No saved board found, creating starter board");
                let mut session = Self::with_store(BoardStore::starter(), persistence);
                session.save()?;
                Ok(session)
            }
        }
    }

    /// Bind an existing store without loading anything
    pub fn with_store(store: BoardStore, persistence: P) -> Self {
        Self { store, persistence }
    }

    /// Get the store
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Take an owned snapshot of the board
    pub fn snapshot(&self) -> Board {
        self.store.snapshot()
    }

    /// Get the persistence adapter
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Apply a command and persist if it changed the board
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        self.update(|store| store.apply(command))
    }

    /// Run arbitrary store operations, then persist if anything changed
    ///
    /// Lets callers use the typed store methods (e.g. `add_card`, which
    /// returns the new ID) while keeping save-after-mutation in one place.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut BoardStore) -> R) -> Result<R> {
        let revision = self.store.revision();
        let result = f(&mut self.store);
        if self.store.revision() != revision {
            self.save()?;
        }
        Ok(result)
    }

    /// Save the current snapshot
    pub fn save(&mut self) -> Result<()> {
        self.persistence
            .save(self.store.board())
            .context("Failed to save board")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardDraft, ColumnTheme};
    use crate::storage::MemoryPersistence;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_open_seeds_and_saves_starter_board() {
        let session = Session::open(MemoryPersistence::new()).unwrap();

        assert_eq!(session.store().columns().len(), 3);
        assert_eq!(session.persistence().save_count(), 1);
        assert!(session.persistence().contents().is_some());
    }

    #[test]
    fn test_open_loads_existing_board() {
        let persistence = MemoryPersistence::with_contents(
            r#"{"boardTitle":"Saved","columns":[],"availableTags":[]}"#,
        );
        let session = Session::open(persistence).unwrap();

        assert_eq!(session.store().title(), "Saved");
        assert!(session.store().columns().is_empty());
        assert_eq!(session.persistence().save_count(), 0);
    }

    #[test]
    fn test_execute_saves_only_on_change() {
        let mut session = Session::open(MemoryPersistence::new()).unwrap();
        let saves = session.persistence().save_count();

        assert!(session
            .execute(Command::AddTag {
                tag: "errands".to_string()
            })
            .unwrap());
        assert_eq!(session.persistence().save_count(), saves + 1);

        assert!(!session
            .execute(Command::AddTag {
                tag: "errands".to_string()
            })
            .unwrap());
        assert!(!session
            .execute(Command::DeleteColumn {
                column_id: "missing".to_string()
            })
            .unwrap());
        assert_eq!(session.persistence().save_count(), saves + 1);
    }

    #[test]
    fn test_update_returns_result_and_saves() {
        let mut session =
            Session::with_store(BoardStore::new(), MemoryPersistence::new());

        let column_id = session
            .update(|store| store.add_column("Inbox", ColumnTheme::Slate))
            .unwrap();
        let card_id = session
            .update(|store| store.add_card(&column_id, CardDraft::new("Triage")))
            .unwrap();

        assert!(card_id.is_some());
        assert_eq!(session.persistence().save_count(), 2);

        let saved = session.persistence().load().unwrap().unwrap();
        assert_eq!(saved, session.snapshot());
    }

    #[test]
    fn test_file_session_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let (todo, card) = {
            let mut session = Session::open_with_config(&config).unwrap();
            let todo = session.store().columns()[0].id.clone();
            let card = session.store().columns()[0].cards[1].id.clone();
            session
                .execute(Command::move_card(&todo, &todo, &card, Some(0)))
                .unwrap();
            session
                .execute(Command::SetBoardTitle {
                    title: "Home".to_string(),
                })
                .unwrap();
            (todo, card)
        };

        let session = Session::open_with_config(&config).unwrap();
        assert_eq!(session.store().title(), "Home");
        assert_eq!(session.store().column(&todo).unwrap().cards[0].id, card);
    }

    #[test]
    fn test_ids_are_stable_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let first = Session::open_with_config(&config).unwrap().snapshot();
        let second = Session::open_with_config(&config).unwrap().snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_open_reports_corrupt_board() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(config.board_path(), "[1, 2").unwrap();

        let err = Session::open_with_config(&config).err().unwrap();
        assert!(format!("{:#}", err).contains("corrupted"));

        // Next open starts fresh
        let session = Session::open_with_config(&config).unwrap();
        assert_eq!(session.store().columns().len(), 3);
    }
}
