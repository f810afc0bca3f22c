//! Interactive input
//!
//! `card edit --editor` round-trips a card's description through the user's
//! editor. Destructive commands ask for a y/N confirmation first.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;

use anyhow::{bail, Context, Result};

use atlas_core::Card;

/// Marks lines the editor template adds and the parser drops
const COMMENT_PREFIX: &str = "#";

/// Edit a card's description in `$VISUAL` / `$EDITOR`
///
/// Returns the new description, or `None` if the user left it blank.
pub fn edit_description(card: &Card) -> Result<Option<String>> {
    let (program, args) = editor_command()?;

    let mut file = tempfile::Builder::new()
        .prefix("atlas-card-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create a temp file for the description")?;
    file.write_all(description_template(card).as_bytes())
        .context("Failed to write the description template")?;

    let status = Command::new(&program)
        .args(&args)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to run editor: {}", program))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}; description left unchanged", program, status);
    }

    let edited = fs::read_to_string(file.path()).context("Failed to read the edited description")?;
    Ok(parse_description(&edited))
}

/// Editor program and its leading arguments, e.g. `code --wait`
fn editor_command() -> Result<(String, Vec<String>)> {
    let configured = ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty());

    let Some(configured) = configured else {
        bail!("No editor configured. Set $EDITOR (for example: export EDITOR=nano)");
    };
    split_command(&configured)
}

fn split_command(line: &str) -> Result<(String, Vec<String>)> {
    let mut parts = line.split_whitespace().map(str::to_string);
    match parts.next() {
        Some(program) => Ok((program, parts.collect())),
        None => bail!("Editor command is empty"),
    }
}

fn description_template(card: &Card) -> String {
    let mut text = String::new();
    text.push_str(&format!("{} Description for: {}\n", COMMENT_PREFIX, card.title));
    text.push_str(&format!(
        "{} Lines starting with '{}' are ignored. Leave empty to clear.\n\n",
        COMMENT_PREFIX, COMMENT_PREFIX
    ));
    if let Some(description) = &card.description {
        text.push_str(description);
        text.push('\n');
    }
    text
}

/// Drop template comments and surrounding blank lines
fn parse_description(edited: &str) -> Option<String> {
    let body = edited
        .lines()
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n");
    let body = body.trim();
    (!body.is_empty()).then(|| body.to_string())
}

/// Prompt for a y/N answer on the terminal
///
/// Without a TTY on stdin the answer is always no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn card(description: Option<&str>) -> Card {
        Card {
            id: "card-1".to_string(),
            title: "Call dentist".to_string(),
            description: description.map(str::to_string),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_template_round_trip_keeps_description() {
        let card = card(Some("Schedule checkup.\nBring insurance card."));
        let template = description_template(&card);
        assert!(template.starts_with("# Description for: Call dentist"));
        assert_eq!(
            parse_description(&template).as_deref(),
            Some("Schedule checkup.\nBring insurance card.")
        );
    }

    #[test]
    fn test_blank_edit_clears_description() {
        let template = description_template(&card(None));
        assert_eq!(parse_description(&template), None);
        assert_eq!(parse_description("\n   \n"), None);
    }

    #[test]
    fn test_only_leading_hash_lines_are_dropped() {
        // Only lines starting with '#' in column zero are template comments
        assert_eq!(parse_description("  # kept\n#dropped").as_deref(), Some("# kept"));
    }

    #[test]
    fn test_split_command() {
        assert_eq!(
            split_command("code --wait").unwrap(),
            ("code".to_string(), vec!["--wait".to_string()])
        );
        assert_eq!(split_command("nano").unwrap(), ("nano".to_string(), Vec::new()));
        assert!(split_command("   ").is_err());
    }
}
