//! Card command handlers
//!
//! Cards are addressed by ID or unique ID prefix anywhere on the board;
//! the owning column is looked up before a command is issued.

use anyhow::{bail, Result};

use atlas_core::{CardDraft, CardPatch, Command, Persistence, Session};

use super::{normalize_tag, require_title, resolve_card, resolve_column};
use crate::editor::{confirm, edit_description};
use crate::output::{short_id, Output};

/// How `card edit` should treat the description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionEdit {
    Keep,
    Set(String),
    Clear,
    Editor,
}

/// Add a card to the bottom of a column
pub fn add<P: Persistence>(
    session: &mut Session<P>,
    column: String,
    title: String,
    description: Option<String>,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let title = require_title(&title, "Card")?;
    let tags = tags
        .iter()
        .map(|t| normalize_tag(t))
        .collect::<Result<Vec<_>>>()?;
    let column_id = resolve_column(session.store().board(), &column)?.id.clone();

    let mut draft = CardDraft::new(title.clone()).with_tags(tags);
    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        draft = draft.with_description(description);
    }

    let card_id = session.update(|store| store.add_card(&column_id, draft))?;

    match card_id {
        Some(id) => output.created(&id, &format!("Added card {} - {}", short_id(&id), title)),
        None => bail!("Column disappeared before the card could be added"),
    }
    Ok(())
}

/// Show card details
pub fn show<P: Persistence>(session: &Session<P>, id: String, output: &Output) -> Result<()> {
    let (column, card) = resolve_card(session.store().board(), &id)?;
    output.print_card(column, card);
    Ok(())
}

/// Edit a card's title, description, or tags
pub fn edit<P: Persistence>(
    session: &mut Session<P>,
    id: String,
    title: Option<String>,
    description: DescriptionEdit,
    tags: Option<Vec<String>>,
    output: &Output,
) -> Result<()> {
    let (column, card) = resolve_card(session.store().board(), &id)?;
    let column_id = column.id.clone();
    let card_id = card.id.clone();

    let description = match description {
        DescriptionEdit::Keep => None,
        DescriptionEdit::Clear => Some(None),
        DescriptionEdit::Set(text) => Some(non_empty(text)),
        DescriptionEdit::Editor => Some(edit_description(card)?),
    };

    let patch = CardPatch {
        title: title.as_deref().map(|t| require_title(t, "Card")).transpose()?,
        description,
        tags: tags
            .map(|tags| {
                tags.iter()
                    .map(|t| normalize_tag(t))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?,
    };
    if patch.is_empty() {
        bail!("Nothing to change. Pass --title, --description, --editor, or --tag.");
    }

    if session.execute(Command::UpdateCard {
        column_id,
        card_id: card_id.clone(),
        patch,
    })? {
        output.success(&format!("Updated card: {}", short_id(&card_id)));
    } else {
        output.message("Card unchanged.");
    }
    Ok(())
}

/// Delete a card
pub fn delete<P: Persistence>(
    session: &mut Session<P>,
    id: String,
    output: &Output,
) -> Result<()> {
    let (column, card) = resolve_card(session.store().board(), &id)?;
    let column_id = column.id.clone();
    let card_id = card.id.clone();

    if output.should_prompt() {
        println!(
            "Delete card: {} - {} (in {})",
            short_id(&card.id),
            card.title,
            column.title
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    session.execute(Command::DeleteCard {
        column_id,
        card_id: card_id.clone(),
    })?;

    output.success(&format!("Deleted card: {}", short_id(&card_id)));
    Ok(())
}

/// Move a card to a position in a column (its own or another)
pub fn move_card<P: Persistence>(
    session: &mut Session<P>,
    id: String,
    to: String,
    position: Option<usize>,
    output: &Output,
) -> Result<()> {
    let board = session.store().board();
    let (from_column, card) = resolve_card(board, &id)?;
    let to_column = resolve_column(board, &to)?;

    let command = Command::move_card(&from_column.id, &to_column.id, &card.id, position);
    let card_id = card.id.clone();
    let destination = to_column.id.clone();
    let to_title = to_column.title.clone();

    if !session.execute(command)? {
        output.message("Card is already there.");
        return Ok(());
    }

    let landed = session
        .store()
        .column(&destination)
        .and_then(|column| column.card_index(&card_id))
        .unwrap_or_default();
    output.success(&format!(
        "Moved card {} to {} (position {})",
        short_id(&card_id),
        to_title,
        landed
    ));
    Ok(())
}

/// Toggle a tag on a card
///
/// Tags that aren't in the vocabulary yet are created and attached.
pub fn toggle_tag<P: Persistence>(
    session: &mut Session<P>,
    id: String,
    tag: String,
    output: &Output,
) -> Result<()> {
    let tag = normalize_tag(&tag)?;
    let board = session.store().board();
    let (column, card) = resolve_card(board, &id)?;
    let column_id = column.id.clone();
    let card_id = card.id.clone();

    let (command, attached) = if card.has_tag(&tag) {
        let tags: Vec<String> = card.tags.iter().filter(|t| **t != tag).cloned().collect();
        let command = Command::UpdateCard {
            column_id,
            card_id: card_id.clone(),
            patch: CardPatch::tags(tags),
        };
        (command, false)
    } else if board.has_tag(&tag) {
        let mut tags = card.tags.clone();
        tags.push(tag.clone());
        let command = Command::UpdateCard {
            column_id,
            card_id: card_id.clone(),
            patch: CardPatch::tags(tags),
        };
        (command, true)
    } else {
        let command = Command::CreateAndAttachTag {
            column_id,
            card_id: card_id.clone(),
            tag: tag.clone(),
        };
        (command, true)
    };

    session.execute(command)?;

    if attached {
        output.success(&format!("Tagged {} with #{}", short_id(&card_id), tag));
    } else {
        output.success(&format!("Removed #{} from {}", tag, short_id(&card_id)));
    }
    Ok(())
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use atlas_core::{BoardStore, ColumnTheme, MemoryPersistence, SequentialIds};

    /// "To Do" (id-1) holding "Call dentist" (id-2), empty "Done" (id-3),
    /// vocabulary `work`
    fn test_session() -> Session<MemoryPersistence> {
        let mut store = BoardStore::new().with_id_generator(SequentialIds::new("id"));
        store.add_tag("work");
        let todo = store.add_column("To Do", ColumnTheme::Sky);
        store.add_card(&todo, CardDraft::new("Call dentist"));
        store.add_column("Done", ColumnTheme::Emerald);
        Session::with_store(store, MemoryPersistence::new())
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn card_tags(session: &Session<MemoryPersistence>) -> Vec<String> {
        session.store().card("id-1", "id-2").unwrap().tags.clone()
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("text".to_string()), Some("text".to_string()));
    }

    #[test]
    fn test_add_puts_new_tags_in_vocabulary() {
        let mut session = test_session();
        add(
            &mut session,
            "done".to_string(),
            "Renew passport".to_string(),
            Some("   ".to_string()),
            vec![" Errands ".to_string(), "work".to_string()],
            &quiet(),
        )
        .unwrap();

        let done = session.store().column("id-3").unwrap();
        assert_eq!(done.cards[0].title, "Renew passport");
        assert_eq!(done.cards[0].description, None);
        assert_eq!(done.cards[0].tags, vec!["errands", "work"]);
        assert_eq!(session.store().available_tags(), ["work", "errands"]);
        assert_eq!(session.persistence().save_count(), 1);
    }

    #[test]
    fn test_toggle_tag_branches() {
        let mut session = test_session();

        // Vocabulary tag, not on the card yet
        toggle_tag(&mut session, "id-2".to_string(), "Work".to_string(), &quiet()).unwrap();
        assert_eq!(card_tags(&session), vec!["work"]);
        assert_eq!(session.store().available_tags(), ["work"]);

        // Unknown tag is created and attached
        toggle_tag(&mut session, "id-2".to_string(), "errands".to_string(), &quiet()).unwrap();
        assert_eq!(card_tags(&session), vec!["work", "errands"]);
        assert_eq!(session.store().available_tags(), ["work", "errands"]);

        // Tag already on the card is removed from it but stays in the vocabulary
        toggle_tag(&mut session, "id-2".to_string(), "work".to_string(), &quiet()).unwrap();
        assert_eq!(card_tags(&session), vec!["errands"]);
        assert!(session.store().board().has_tag("work"));

        assert_eq!(session.persistence().save_count(), 3);
        assert!(toggle_tag(&mut session, "id-2".to_string(), "  ".to_string(), &quiet()).is_err());
    }

    #[test]
    fn test_edit_replaces_tags_and_extends_vocabulary() {
        let mut session = test_session();
        edit(
            &mut session,
            "id-2".to_string(),
            Some(" Call the dentist ".to_string()),
            DescriptionEdit::Keep,
            Some(vec!["Urgent".to_string()]),
            &quiet(),
        )
        .unwrap();

        let card = session.store().card("id-1", "id-2").unwrap();
        assert_eq!(card.title, "Call the dentist");
        assert_eq!(card.tags, vec!["urgent"]);
        assert_eq!(session.store().available_tags(), ["work", "urgent"]);
    }

    #[test]
    fn test_edit_description_set_blank_and_clear() {
        let mut session = test_session();
        let description = |session: &Session<MemoryPersistence>| {
            session.store().card("id-1", "id-2").unwrap().description.clone()
        };

        edit(
            &mut session,
            "id-2".to_string(),
            None,
            DescriptionEdit::Set("Annual checkup".to_string()),
            None,
            &quiet(),
        )
        .unwrap();
        assert_eq!(description(&session).as_deref(), Some("Annual checkup"));

        // Whitespace-only text clears the description
        edit(
            &mut session,
            "id-2".to_string(),
            None,
            DescriptionEdit::Set("   ".to_string()),
            None,
            &quiet(),
        )
        .unwrap();
        assert_eq!(description(&session), None);

        edit(
            &mut session,
            "id-2".to_string(),
            None,
            DescriptionEdit::Set("Again".to_string()),
            None,
            &quiet(),
        )
        .unwrap();
        edit(
            &mut session,
            "id-2".to_string(),
            None,
            DescriptionEdit::Clear,
            None,
            &quiet(),
        )
        .unwrap();
        assert_eq!(description(&session), None);
    }

    #[test]
    fn test_edit_requires_a_change() {
        let mut session = test_session();
        let result = edit(
            &mut session,
            "id-2".to_string(),
            None,
            DescriptionEdit::Keep,
            None,
            &quiet(),
        );
        assert!(result.is_err());
        assert_eq!(session.persistence().save_count(), 0);
    }

    #[test]
    fn test_move_card_already_there_saves_nothing() {
        let mut session = test_session();

        move_card(&mut session, "id-2".to_string(), "To Do".to_string(), Some(0), &quiet()).unwrap();
        assert_eq!(session.persistence().save_count(), 0);

        move_card(&mut session, "id-2".to_string(), "done".to_string(), None, &quiet()).unwrap();
        assert!(session.store().column("id-1").unwrap().cards.is_empty());
        assert_eq!(session.store().column("id-3").unwrap().cards[0].id, "id-2");
        assert_eq!(session.persistence().save_count(), 1);
    }

    #[test]
    fn test_delete_without_prompt() {
        let mut session = test_session();
        delete(&mut session, "id-2".to_string(), &quiet()).unwrap();
        assert_eq!(session.store().card_count(), 0);
        assert!(delete(&mut session, "id-2".to_string(), &quiet()).is_err());
    }
}
