//! Command handlers
//!
//! Each handler validates user input, resolves IDs against the current
//! board, and hands a plain command to the session.

pub mod board;
pub mod card;
pub mod column;
pub mod config;
pub mod status;
pub mod tag;

use anyhow::{bail, Result};

use atlas_core::{Board, Card, Column};

use crate::output::short_id;

/// Resolve a column by full ID, ID prefix, or exact title (case-insensitive)
pub fn resolve_column<'a>(board: &'a Board, query: &str) -> Result<&'a Column> {
    if let Some(column) = board.column(query) {
        return Ok(column);
    }

    let by_prefix: Vec<&Column> = board
        .columns
        .iter()
        .filter(|c| c.id.starts_with(query))
        .collect();
    let matches = if by_prefix.is_empty() {
        board
            .columns
            .iter()
            .filter(|c| c.title.eq_ignore_ascii_case(query.trim()))
            .collect()
    } else {
        by_prefix
    };

    match matches.len() {
        0 => bail!("No column found matching: {}", query),
        1 => Ok(matches[0]),
        _ => {
            eprintln!("Multiple columns match '{}':", query);
            for column in &matches {
                eprintln!("  {} - {}", short_id(&column.id), column.title);
            }
            bail!("Ambiguous column. Please provide more characters of the ID.");
        }
    }
}

/// Resolve a card anywhere on the board by full ID or ID prefix
pub fn resolve_card<'a>(board: &'a Board, query: &str) -> Result<(&'a Column, &'a Card)> {
    if let Some(found) = board.find_card(query) {
        return Ok(found);
    }

    let matches: Vec<(&Column, &Card)> = board
        .columns
        .iter()
        .flat_map(|column| column.cards.iter().map(move |card| (column, card)))
        .filter(|(_, card)| card.id.starts_with(query))
        .collect();

    match matches.len() {
        0 => bail!("No card found matching: {}", query),
        1 => Ok(matches[0]),
        _ => {
            eprintln!("Multiple cards match '{}':", query);
            for (column, card) in &matches {
                eprintln!(
                    "  {} - {} ({})",
                    short_id(&card.id),
                    card.title,
                    column.title
                );
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Normalize a tag the way the board expects: trimmed and lower-case
pub fn normalize_tag(raw: &str) -> Result<String> {
    let tag = raw.trim().to_lowercase();
    if tag.is_empty() {
        bail!("Tag cannot be empty");
    }
    Ok(tag)
}

/// Trim a title and reject it if nothing is left
pub fn require_title(raw: &str, what: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        bail!("{} title cannot be empty", what);
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{BoardStore, CardDraft, ColumnTheme, SequentialIds};

    fn test_board() -> Board {
        let mut store = BoardStore::new().with_id_generator(SequentialIds::new("id"));
        let todo = store.add_column("To Do", ColumnTheme::Sky);
        let done = store.add_column("Done", ColumnTheme::Emerald);
        store.add_card(&todo, CardDraft::new("first"));
        store.add_card(&done, CardDraft::new("second"));
        store.into_board()
    }

    #[test]
    fn test_resolve_column_by_id_and_title() {
        let board = test_board();
        assert_eq!(resolve_column(&board, "id-1").unwrap().title, "To Do");
        assert_eq!(resolve_column(&board, "done").unwrap().id, "id-2");
        assert!(resolve_column(&board, "Doing").is_err());
    }

    #[test]
    fn test_resolve_column_ambiguous_prefix() {
        let board = test_board();
        assert!(resolve_column(&board, "id-").is_err());
    }

    #[test]
    fn test_resolve_card() {
        let board = test_board();
        let (column, card) = resolve_card(&board, "id-4").unwrap();
        assert_eq!(column.title, "Done");
        assert_eq!(card.title, "second");
        assert!(resolve_card(&board, "id-9").is_err());
        assert!(resolve_card(&board, "id-1").is_err());
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Urgent ").unwrap(), "urgent");
        assert!(normalize_tag("   ").is_err());
    }

    #[test]
    fn test_require_title() {
        assert_eq!(require_title(" Done ", "Column").unwrap(), "Done");
        assert!(require_title("", "Card").is_err());
    }
}
