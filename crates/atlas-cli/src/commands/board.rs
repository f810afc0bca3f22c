//! Board command handlers

use anyhow::Result;

use atlas_core::{Command, Persistence, Session};

use super::require_title;
use crate::output::Output;

/// Show every column and card
pub fn show<P: Persistence>(session: &Session<P>, output: &Output) -> Result<()> {
    output.print_board(session.store().board());
    Ok(())
}

/// Rename the board
pub fn title<P: Persistence>(
    session: &mut Session<P>,
    title: String,
    output: &Output,
) -> Result<()> {
    let title = require_title(&title, "Board")?;

    if session.execute(Command::SetBoardTitle {
        title: title.clone(),
    })? {
        output.success(&format!("Board renamed to: {}", title));
    } else {
        output.message("Board title unchanged.");
    }

    Ok(())
}
