//! Status command handler

use anyhow::Result;

use atlas_core::{Config, JsonFilePersistence, Session};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(session: &Session<JsonFilePersistence>, config: &Config, output: &Output) -> Result<()> {
    let persistence = session.persistence();
    let store = session.store();
    let board_size = persistence.file_size().unwrap_or(0);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "board_title": store.title(),
                    "board_file": persistence.path(),
                    "board_exists": persistence.exists(),
                    "board_size": board_size,
                    "log_file": config.log_path(),
                    "counts": {
                        "columns": store.columns().len(),
                        "cards": store.card_count(),
                        "tags": store.available_tags().len()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", persistence.path().display());
        }
        OutputFormat::Human => {
            println!("Atlas Status");
            println!("============");
            println!();
            println!("Board:");
            println!("  Title:    {}", store.title());
            println!("  File:     {}", persistence.path().display());
            println!("  Size:     {}", human_size(board_size));
            println!();
            println!("Logging:");
            println!("  Level:    {}", config.log_level);
            println!("  File:     {}", config.log_path().display());
            println!();
            println!("Contents:");
            println!("  Columns:  {}", store.columns().len());
            println!("  Cards:    {}", store.card_count());
            println!("  Tags:     {}", store.available_tags().len());
        }
    }

    Ok(())
}

/// Format a byte count for display
fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
