//! Board store
//!
//! The `BoardStore` is the single owner of board state. All mutation goes
//! through its commands, each of which either fully applies or leaves the
//! board untouched:
//!
//! - Unknown column or card IDs are a silent no-op
//! - Insertion positions are clamped, never rejected
//! - Adding a tag that already exists is idempotent
//! - Every tag on a card is also in the board's vocabulary
//!
//! Commands return whether anything changed. The store performs no I/O;
//! persisting a snapshot is the host's job (see `Session`).
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = BoardStore::new();
//! let todo = store.add_column("To Do", ColumnTheme::Sky);
//! let card = store.add_card(&todo, CardDraft::new("Call dentist")).unwrap();
//! store.move_card(&todo, &todo, &card, Some(0));
//!
//! let snapshot = store.snapshot();
//! ```

use chrono::Utc;
use tracing::debug;

use crate::command::Command;
use crate::id::{IdGenerator, RandomIds};
use crate::models::{Board, Card, CardDraft, CardPatch, Column, ColumnPatch, ColumnTheme};
use crate::ordering;

/// Owner of the board and its mutation commands
pub struct BoardStore {
    /// Current board state
    board: Board,
    /// Source of column and card IDs
    ids: Box<dyn IdGenerator>,
    /// Bumped on every command that changes state
    revision: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore")
            .field("board", &self.board)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl BoardStore {
    /// Create a store holding an empty, default-titled board
    pub fn new() -> Self {
        Self::from_board(Board::default())
    }

    /// Create a store from a previously saved snapshot
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            ids: Box::new(RandomIds),
            revision: 0,
        }
    }

    /// Replace the ID generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    // ==================== Queries ====================

    /// Borrow the current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take an owned snapshot of the current board
    ///
    /// Later commands never affect a snapshot already taken.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Consume the store, returning the board
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Number of state-changing commands applied since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn title(&self) -> &str {
        &self.board.title
    }

    pub fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    pub fn available_tags(&self) -> &[String] {
        &self.board.available_tags
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.board.column(column_id)
    }

    pub fn card(&self, column_id: &str, card_id: &str) -> Option<&Card> {
        self.board.card(column_id, card_id)
    }

    /// Find a card on any column
    pub fn find_card(&self, card_id: &str) -> Option<(&Column, &Card)> {
        self.board.find_card(card_id)
    }

    pub fn card_count(&self) -> usize {
        self.board.card_count()
    }

    /// Vocabulary tags with usage counts
    pub fn tags_with_counts(&self) -> Vec<(String, usize)> {
        self.board.tags_with_counts()
    }

    // ==================== Dispatch ====================

    /// Apply a command value
    ///
    /// Returns true if the board changed.
    pub fn apply(&mut self, command: Command) -> bool {
        let name = command.name();
        let changed = match command {
            Command::SetBoardTitle { title } => self.set_board_title(title),
            Command::AddColumn { title, theme } => {
                self.add_column(title, theme);
                true
            }
            Command::UpdateColumn { column_id, patch } => self.update_column(&column_id, patch),
            Command::DeleteColumn { column_id } => self.delete_column(&column_id),
            Command::AddCard { column_id, draft } => self.add_card(&column_id, draft).is_some(),
            Command::UpdateCard {
                column_id,
                card_id,
                patch,
            } => self.update_card(&column_id, &card_id, patch),
            Command::DeleteCard { column_id, card_id } => self.delete_card(&column_id, &card_id),
            Command::MoveCard {
                from_column_id,
                to_column_id,
                card_id,
                position,
            } => self.move_card(&from_column_id, &to_column_id, &card_id, position),
            Command::AddTag { tag } => self.add_tag(tag),
            Command::RemoveTag { tag } => self.remove_tag(&tag),
            Command::CreateAndAttachTag {
                column_id,
                card_id,
                tag,
            } => self.create_and_attach_tag(&column_id, &card_id, tag),
        };
        debug!(command = name, changed, revision = self.revision, "applied command");
        changed
    }

    // ==================== Board Operations ====================

    /// Replace the board title
    pub fn set_board_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.board.title == title {
            return false;
        }
        self.board.title = title;
        self.touch()
    }

    // ==================== Column Operations ====================

    /// Append a new empty column, returning its ID
    pub fn add_column(&mut self, title: impl Into<String>, theme: ColumnTheme) -> String {
        let id = self.fresh_id();
        self.board
            .columns
            .push(Column::new(id.clone(), title, theme));
        self.touch();
        id
    }

    /// Merge a patch into a column
    pub fn update_column(&mut self, column_id: &str, patch: ColumnPatch) -> bool {
        let Some(column) = self.column_mut(column_id) else {
            return false;
        };
        if !patch.apply_to(column) {
            return false;
        }
        self.touch()
    }

    /// Delete a column and every card it owns
    pub fn delete_column(&mut self, column_id: &str) -> bool {
        let Some(index) = self.column_index(column_id) else {
            return false;
        };
        self.board.columns.remove(index);
        self.touch()
    }

    // ==================== Card Operations ====================

    /// Append a new card to a column, returning its ID
    ///
    /// Card tags missing from the vocabulary are added to it. Returns
    /// `None` (and changes nothing) if the column doesn't exist.
    pub fn add_card(&mut self, column_id: &str, draft: CardDraft) -> Option<String> {
        let index = self.column_index(column_id)?;
        let id = self.fresh_id();
        let card = Card::from_draft(id.clone(), draft, Utc::now());
        self.extend_vocabulary(&card.tags);
        self.board.columns[index].cards.push(card);
        self.touch();
        Some(id)
    }

    /// Merge a patch into a card
    ///
    /// New tags in the patch join the vocabulary in the same step.
    pub fn update_card(&mut self, column_id: &str, card_id: &str, patch: CardPatch) -> bool {
        let Some(card) = self.card_mut(column_id, card_id) else {
            return false;
        };
        if !patch.apply_to(card) {
            return false;
        }
        let tags = card.tags.clone();
        self.extend_vocabulary(&tags);
        self.touch()
    }

    /// Delete a card, keeping the remaining cards in order
    pub fn delete_card(&mut self, column_id: &str, card_id: &str) -> bool {
        let Some(column) = self.column_mut(column_id) else {
            return false;
        };
        let Some(index) = column.card_index(card_id) else {
            return false;
        };
        column.cards.remove(index);
        self.touch()
    }

    /// Move a card within a column or to another column
    ///
    /// `position` is the index the caller dropped the card at, measured
    /// against the list as displayed before the move. `None` appends.
    ///
    /// Within a column, a position after the card's current index is
    /// shifted down by one to account for the card's own removal. Across
    /// columns, the position is clamped to the destination's length.
    pub fn move_card(
        &mut self,
        from_column_id: &str,
        to_column_id: &str,
        card_id: &str,
        position: Option<usize>,
    ) -> bool {
        if from_column_id == to_column_id {
            return self.reorder_card(from_column_id, card_id, position);
        }

        let Some(from) = self.column_index(from_column_id) else {
            return false;
        };
        let Some(to) = self.column_index(to_column_id) else {
            return false;
        };
        let Some(card_index) = self.board.columns[from].card_index(card_id) else {
            return false;
        };

        // Every lookup is resolved before touching either list
        let card = self.board.columns[from].cards.remove(card_index);
        ordering::insert_at(&mut self.board.columns[to].cards, card, position);
        self.touch()
    }

    fn reorder_card(&mut self, column_id: &str, card_id: &str, position: Option<usize>) -> bool {
        let Some(column) = self.column_mut(column_id) else {
            return false;
        };
        let Some(current) = column.card_index(card_id) else {
            return false;
        };
        if !ordering::reorder(&mut column.cards, current, position) {
            return false;
        }
        self.touch()
    }

    // ==================== Tag Operations ====================

    /// Add a tag to the vocabulary if it isn't already there
    ///
    /// Comparison is exact; normalization is up to the caller.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.board.has_tag(&tag) {
            return false;
        }
        self.board.available_tags.push(tag);
        self.touch()
    }

    /// Remove a tag from the vocabulary and from every card
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.board.available_tags.len();
        self.board.available_tags.retain(|t| t != tag);
        let mut changed = self.board.available_tags.len() != before;

        for card in self
            .board
            .columns
            .iter_mut()
            .flat_map(|column| column.cards.iter_mut())
        {
            changed |= card.remove_tag(tag);
        }

        if !changed {
            return false;
        }
        self.touch()
    }

    /// Add a tag to the vocabulary and attach it to a card
    ///
    /// No-op if the card doesn't exist. The card's tags stay de-duplicated.
    pub fn create_and_attach_tag(
        &mut self,
        column_id: &str,
        card_id: &str,
        tag: impl Into<String>,
    ) -> bool {
        let tag = tag.into();
        if self.card(column_id, card_id).is_none() {
            return false;
        }

        let mut changed = self.extend_vocabulary(std::slice::from_ref(&tag));
        if let Some(card) = self.card_mut(column_id, card_id) {
            changed |= card.add_tag(tag);
        }

        if !changed {
            return false;
        }
        self.touch()
    }

    // ==================== Internals ====================

    /// Generate an ID not already present on the board
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if !self.board.contains_id(&id) {
                return id;
            }
        }
    }

    /// Append tags the vocabulary doesn't know yet, in order
    fn extend_vocabulary(&mut self, tags: &[String]) -> bool {
        let mut changed = false;
        for tag in tags {
            if !self.board.has_tag(tag) {
                self.board.available_tags.push(tag.clone());
                changed = true;
            }
        }
        changed
    }

    fn touch(&mut self) -> bool {
        self.revision += 1;
        true
    }

    fn column_index(&self, column_id: &str) -> Option<usize> {
        self.board
            .columns
            .iter()
            .position(|column| column.id == column_id)
    }

    fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.board
            .columns
            .iter_mut()
            .find(|column| column.id == column_id)
    }

    fn card_mut(&mut self, column_id: &str, card_id: &str) -> Option<&mut Card> {
        self.column_mut(column_id)?
            .cards
            .iter_mut()
            .find(|card| card.id == card_id)
    }
}
