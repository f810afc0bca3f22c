//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use atlas_core::{Board, Card, Column};

/// Number of ID characters shown in human output
const SHORT_ID_LEN: usize = 8;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the whole board
    pub fn print_board(&self, board: &Board) {
        match self.format {
            OutputFormat::Human => {
                println!("{}", board.title);
                println!("{}", "=".repeat(board.title.chars().count().max(3)));

                if board.columns.is_empty() {
                    println!();
                    println!("No columns yet. Add one with: atlas column add <TITLE>");
                    return;
                }

                for column in &board.columns {
                    println!();
                    println!(
                        "── {} ({}) [{}] ── {} card(s)",
                        column.title,
                        column.theme,
                        short_id(&column.id),
                        column.cards.len()
                    );
                    for (index, card) in column.cards.iter().enumerate() {
                        println!("  {}", card_line(index, card));
                    }
                }
            }
            OutputFormat::Json => print_json(board),
            OutputFormat::Quiet => {
                for column in &board.columns {
                    for card in &column.cards {
                        println!("{}", card.id);
                    }
                }
            }
        }
    }

    /// Print a list of columns
    pub fn print_columns(&self, columns: &[Column]) {
        match self.format {
            OutputFormat::Human => {
                if columns.is_empty() {
                    println!("No columns found.");
                    return;
                }
                for column in columns {
                    println!(
                        "{} | {} | {} | {} card(s)",
                        short_id(&column.id),
                        truncate(&column.title, 30),
                        column.theme,
                        column.cards.len()
                    );
                }
                println!("\n{} column(s)", columns.len());
            }
            OutputFormat::Json => {
                let json_columns: Vec<_> = columns
                    .iter()
                    .map(|column| {
                        serde_json::json!({
                            "id": column.id,
                            "title": column.title,
                            "theme": column.theme,
                            "cardCount": column.cards.len()
                        })
                    })
                    .collect();
                print_json(&json_columns);
            }
            OutputFormat::Quiet => {
                for column in columns {
                    println!("{}", column.id);
                }
            }
        }
    }

    /// Print a single card with its column
    pub fn print_card(&self, column: &Column, card: &Card) {
        match self.format {
            OutputFormat::Human => {
                let position = column.card_index(&card.id).unwrap_or_default();
                println!("ID:          {}", card.id);
                println!("Title:       {}", card.title);
                println!(
                    "Column:      {} (position {})",
                    column.title, position
                );
                if let Some(ref desc) = card.description {
                    println!("Description: {}", desc);
                }
                if !card.tags.is_empty() {
                    println!("Tags:        {}", card.tags.join(", "));
                }
                println!("Created:     {}", card.created_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "columnId": column.id,
                    "card": card
                }));
            }
            OutputFormat::Quiet => {
                println!("{}", card.id);
            }
        }
    }

    /// Print a list of tags with usage counts
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_tags);
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message along with the ID it concerns
    ///
    /// Quiet mode prints just the ID so scripts can capture it.
    pub fn created(&self, id: &str, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "id": id, "message": message})
                );
            }
            OutputFormat::Quiet => println!("{}", id),
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty-print a value as JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON output: {}", e),
    }
}

/// One line of a column listing
fn card_line(index: usize, card: &Card) -> String {
    let mut line = format!(
        "{:>2}. {} {}",
        index,
        short_id(&card.id),
        truncate(&card.title, 50)
    );
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().map(|t| format!("#{}", t)).collect();
        line.push_str("  ");
        line.push_str(&tags.join(" "));
    }
    line
}

/// Leading characters of an ID
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
