//! Starter board
//!
//! A first run shows a small example board instead of an empty screen.

use crate::models::{CardDraft, ColumnTheme};
use crate::store::BoardStore;

/// Tags available on a fresh board
pub const STARTER_TAGS: [&str; 6] = [
    "work",
    "personal",
    "health",
    "urgent",
    "low-priority",
    "shopping",
];

/// Fill an empty store with the starter columns, cards, and tags
pub fn seed(store: &mut BoardStore) {
    for tag in STARTER_TAGS {
        store.add_tag(tag);
    }

    let todo = store.add_column("To Do", ColumnTheme::Sky);
    store.add_card(
        &todo,
        CardDraft::new("Buy groceries")
            .with_description("Milk, bread, eggs, and vegetables for the week.")
            .with_tags(["personal"]),
    );
    store.add_card(
        &todo,
        CardDraft::new("Call dentist")
            .with_description("Schedule annual checkup appointment.")
            .with_tags(["health"]),
    );

    let in_progress = store.add_column("In Progress", ColumnTheme::Violet);
    store.add_card(
        &in_progress,
        CardDraft::new("Finish project report")
            .with_description("Complete the quarterly project summary for the team.")
            .with_tags(["work"]),
    );

    store.add_column("Done", ColumnTheme::Emerald);
}

impl BoardStore {
    /// Create a store holding the starter board
    pub fn starter() -> Self {
        let mut store = Self::new();
        seed(&mut store);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_board() {
        let store = BoardStore::starter();
        let board = store.board();

        assert_eq!(board.title, "My Todo Board");
        assert_eq!(board.available_tags, STARTER_TAGS.to_vec());

        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(board.columns[0].cards.len(), 2);
        assert_eq!(board.columns[1].cards.len(), 1);
        assert!(board.columns[2].cards.is_empty());
        assert_eq!(board.columns[1].theme, ColumnTheme::Violet);
    }

    #[test]
    fn test_starter_card_tags_are_in_vocabulary() {
        let store = BoardStore::starter();
        for column in store.columns() {
            for card in &column.cards {
                for tag in &card.tags {
                    assert!(store.board().has_tag(tag), "{} missing", tag);
                }
            }
        }
    }
}
