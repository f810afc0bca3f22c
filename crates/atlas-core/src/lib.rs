//! Atlas Flow Core Library
//!
//! This crate provides the board state manager behind Atlas Flow, a
//! column-and-card task board with a shared tag vocabulary.
//!
//! # Architecture
//!
//! - **BoardStore**: Single owner of board state; every mutation is a command
//! - **Session**: Host that runs commands and persists the resulting snapshot
//! - **Persistence**: Pluggable snapshot storage (JSON file, in-memory)
//!
//! The store performs no I/O. Hosts decide when a snapshot reaches disk.
//!
//! # Quick Start
//!
//! ```text
//! let mut session = Session::open_default()?;
//!
//! // Move the first card of "To Do" to the end of "Done"
//! let board = session.snapshot();
//! let todo = &board.columns[0];
//! let done = &board.columns[2];
//! session.execute(Command::move_card(&todo.id, &done.id, &todo.cards[0].id, None))?;
//! ```
//!
//! # Modules
//!
//! - `store`: Board store and its commands (main entry point)
//! - `models`: Board, column, card, and patch types
//! - `command`: Command values for routing presentation input
//! - `ordering`: Insertion-position arithmetic used by moves
//! - `session`: Store plus persistence, save-after-mutation
//! - `storage`: Persistence adapters
//! - `config`: Application configuration

pub mod command;
pub mod config;
pub mod id;
pub mod models;
pub mod ordering;
pub mod session;
pub mod starter;
pub mod storage;
pub mod store;

pub use command::Command;
pub use config::Config;
pub use id::{IdGenerator, RandomIds, SequentialIds};
pub use models::{
    Board, Card, CardDraft, CardPatch, Column, ColumnPatch, ColumnTheme, ParseThemeError,
};
pub use session::Session;
pub use storage::{
    JsonFilePersistence, MemoryPersistence, Persistence, StorageError, StorageResult,
};
pub use store::BoardStore;
