//! Column command handlers

use anyhow::{bail, Result};

use atlas_core::{ColumnPatch, ColumnTheme, Command, Persistence, Session};

use super::{require_title, resolve_column};
use crate::editor::confirm;
use crate::output::{short_id, Output};

/// Add a column at the end of the board
pub fn add<P: Persistence>(
    session: &mut Session<P>,
    title: String,
    theme: ColumnTheme,
    output: &Output,
) -> Result<()> {
    let title = require_title(&title, "Column")?;
    let id = session.update(|store| store.add_column(title.clone(), theme))?;

    output.created(
        &id,
        &format!("Added column {} - {} ({})", short_id(&id), title, theme),
    );
    Ok(())
}

/// List columns in board order
pub fn list<P: Persistence>(session: &Session<P>, output: &Output) -> Result<()> {
    output.print_columns(session.store().columns());
    Ok(())
}

/// Rename or re-theme a column
pub fn edit<P: Persistence>(
    session: &mut Session<P>,
    id: String,
    title: Option<String>,
    theme: Option<ColumnTheme>,
    output: &Output,
) -> Result<()> {
    let patch = ColumnPatch {
        title: title.as_deref().map(|t| require_title(t, "Column")).transpose()?,
        theme,
    };
    if patch.is_empty() {
        bail!("Nothing to change. Pass --title and/or --theme.");
    }

    let column_id = resolve_column(session.store().board(), &id)?.id.clone();

    if session.execute(Command::UpdateColumn {
        column_id: column_id.clone(),
        patch,
    })? {
        output.success(&format!("Updated column: {}", short_id(&column_id)));
    } else {
        output.message("Column unchanged.");
    }

    Ok(())
}

/// Delete a column and its cards
pub fn delete<P: Persistence>(
    session: &mut Session<P>,
    id: String,
    output: &Output,
) -> Result<()> {
    let column = resolve_column(session.store().board(), &id)?;
    let column_id = column.id.clone();

    if output.should_prompt() {
        println!(
            "Delete column: {} - {} ({} card(s) will be deleted)",
            short_id(&column.id),
            column.title,
            column.cards.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    session.execute(Command::DeleteColumn {
        column_id: column_id.clone(),
    })?;

    output.success(&format!("Deleted column: {}", short_id(&column_id)));
    Ok(())
}
