//! Board commands
//!
//! Every mutation the presentation layer can request, as a value. A host
//! routes these through `BoardStore::apply` (or `Session::execute`) so it has
//! a single place to log and persist.

use crate::models::{CardDraft, CardPatch, ColumnPatch, ColumnTheme};

/// A mutation request against the board
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetBoardTitle {
        title: String,
    },
    AddColumn {
        title: String,
        theme: ColumnTheme,
    },
    UpdateColumn {
        column_id: String,
        patch: ColumnPatch,
    },
    DeleteColumn {
        column_id: String,
    },
    AddCard {
        column_id: String,
        draft: CardDraft,
    },
    UpdateCard {
        column_id: String,
        card_id: String,
        patch: CardPatch,
    },
    DeleteCard {
        column_id: String,
        card_id: String,
    },
    /// Drag-and-drop result: `{card_id, from_column_id}` plus a drop index
    MoveCard {
        from_column_id: String,
        to_column_id: String,
        card_id: String,
        position: Option<usize>,
    },
    AddTag {
        tag: String,
    },
    RemoveTag {
        tag: String,
    },
    /// Add a tag to the vocabulary and attach it to one card
    CreateAndAttachTag {
        column_id: String,
        card_id: String,
        tag: String,
    },
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetBoardTitle { .. } => "set_board_title",
            Command::AddColumn { .. } => "add_column",
            Command::UpdateColumn { .. } => "update_column",
            Command::DeleteColumn { .. } => "delete_column",
            Command::AddCard { .. } => "add_card",
            Command::UpdateCard { .. } => "update_card",
            Command::DeleteCard { .. } => "delete_card",
            Command::MoveCard { .. } => "move_card",
            Command::AddTag { .. } => "add_tag",
            Command::RemoveTag { .. } => "remove_tag",
            Command::CreateAndAttachTag { .. } => "create_and_attach_tag",
        }
    }

    /// Shorthand for a move command
    pub fn move_card(
        from_column_id: impl Into<String>,
        to_column_id: impl Into<String>,
        card_id: impl Into<String>,
        position: Option<usize>,
    ) -> Self {
        Command::MoveCard {
            from_column_id: from_column_id.into(),
            to_column_id: to_column_id.into(),
            card_id: card_id.into(),
            position,
        }
    }
}
