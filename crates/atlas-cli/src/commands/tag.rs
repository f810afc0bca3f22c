//! Tag command handlers

use anyhow::Result;

use atlas_core::{Command, Persistence, Session};

use super::normalize_tag;
use crate::editor::confirm;
use crate::output::Output;

/// List all tags with usage counts
pub fn list<P: Persistence>(session: &Session<P>, output: &Output) -> Result<()> {
    output.print_tags(&session.store().tags_with_counts());
    Ok(())
}

/// Add a tag to the vocabulary
pub fn add<P: Persistence>(session: &mut Session<P>, tag: String, output: &Output) -> Result<()> {
    let tag = normalize_tag(&tag)?;

    if session.execute(Command::AddTag { tag: tag.clone() })? {
        output.success(&format!("Added tag: {}", tag));
    } else {
        output.message(&format!("Tag already exists: {}", tag));
    }
    Ok(())
}

/// Remove a tag from the vocabulary and every card
pub fn remove<P: Persistence>(
    session: &mut Session<P>,
    tag: String,
    output: &Output,
) -> Result<()> {
    let tag = normalize_tag(&tag)?;
    let usage = session
        .store()
        .tags_with_counts()
        .into_iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, count)| count)
        .unwrap_or(0);

    if output.should_prompt() && usage > 0 {
        println!("Tag '{}' is used on {} card(s).", tag, usage);
        if !confirm("Remove it from the board and from every card?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if session.execute(Command::RemoveTag { tag: tag.clone() })? {
        output.success(&format!("Removed tag: {}", tag));
    } else {
        output.message(&format!("No tag named: {}", tag));
    }
    Ok(())
}
