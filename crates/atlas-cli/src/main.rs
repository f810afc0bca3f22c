//! Atlas CLI
//!
//! Command-line interface for Atlas Flow - a column-and-card task board.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use atlas_core::{ColumnTheme, Config, Session, StorageError};

mod commands;
mod editor;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Atlas Flow - columns, cards, and tags from the terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or rename the board
    Board {
        #[command(subcommand)]
        command: Option<BoardCommands>,
    },
    /// Manage columns
    Column {
        #[command(subcommand)]
        command: ColumnCommands,
    },
    /// Manage cards
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },
    /// Manage the tag vocabulary
    Tag {
        #[command(subcommand)]
        command: Option<TagCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (board file, counts)
    Status,
}

#[derive(Subcommand)]
enum BoardCommands {
    /// Show all columns and cards
    Show,
    /// Rename the board
    Title {
        /// New board title
        title: String,
    },
}

#[derive(Subcommand)]
enum ColumnCommands {
    /// Add a column at the end of the board
    #[command(alias = "create")]
    Add {
        /// Column title
        title: String,
        /// Column theme (sky, amber, violet, emerald, rose, slate)
        #[arg(short = 'T', long, default_value = "sky")]
        theme: ColumnTheme,
    },
    /// List columns
    #[command(alias = "ls")]
    List,
    /// Rename or re-theme a column
    Edit {
        /// Column ID (full, prefix, or title)
        id: String,
        /// New title
        #[arg(short = 't', long)]
        title: Option<String>,
        /// New theme
        #[arg(short = 'T', long)]
        theme: Option<ColumnTheme>,
    },
    /// Delete a column and all of its cards
    #[command(alias = "rm")]
    Delete {
        /// Column ID (full, prefix, or title)
        id: String,
    },
}

#[derive(Subcommand)]
enum CardCommands {
    /// Add a card at the bottom of a column
    #[command(alias = "create")]
    Add {
        /// Column ID (full, prefix, or title)
        column: String,
        /// Card title
        title: String,
        /// Card description
        #[arg(short, long)]
        description: Option<String>,
        /// Tags to attach (created if new)
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// Show card details
    Show {
        /// Card ID (full or prefix)
        id: String,
    },
    /// Edit a card
    Edit {
        /// Card ID (full or prefix)
        id: String,
        /// New title
        #[arg(short = 't', long)]
        title: Option<String>,
        /// New description
        #[arg(short, long, conflicts_with_all = ["clear_description", "editor"])]
        description: Option<String>,
        /// Remove the description
        #[arg(long, conflicts_with = "editor")]
        clear_description: bool,
        /// Edit the description in $EDITOR
        #[arg(short, long)]
        editor: bool,
        /// Replace tags (repeatable)
        #[arg(long = "tag", conflicts_with = "clear_tags")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,
    },
    /// Delete a card
    #[command(alias = "rm")]
    Delete {
        /// Card ID (full or prefix)
        id: String,
    },
    /// Move a card within its column or to another column
    #[command(alias = "mv")]
    Move {
        /// Card ID (full or prefix)
        id: String,
        /// Destination column ID (full, prefix, or title)
        to: String,
        /// Zero-based drop position (default: end of column)
        #[arg(short, long)]
        position: Option<usize>,
    },
    /// Toggle a tag on a card (creates the tag if new)
    Tag {
        /// Card ID (full or prefix)
        id: String,
        /// Tag name
        tag: String,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    /// List tags with usage counts
    #[command(alias = "ls")]
    List,
    /// Add a tag to the vocabulary
    Add {
        /// Tag name
        tag: String,
    },
    /// Remove a tag from the vocabulary and from every card
    #[command(alias = "rm")]
    Remove {
        /// Tag name
        tag: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, board_file, log_level, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the board
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;
    init_logging(&config);

    let mut session = match Session::open_with_config(&config) {
        Ok(session) => session,
        Err(e) => {
            report_storage_error(&e);
            return Err(e);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Board { command: None }) {
        Commands::Board { command } => handle_board_command(command, &mut session, &output),
        Commands::Column { command } => handle_column_command(command, &mut session, &output),
        Commands::Card { command } => handle_card_command(command, &mut session, &output),
        Commands::Tag { command } => handle_tag_command(command, &mut session, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&session, &config, &output),
    };

    if let Err(ref e) = result {
        report_storage_error(e);
    }
    result
}

type FileSession = Session<atlas_core::JsonFilePersistence>;

fn handle_board_command(
    command: Option<BoardCommands>,
    session: &mut FileSession,
    output: &Output,
) -> Result<()> {
    match command {
        Some(BoardCommands::Show) | None => commands::board::show(session, output),
        Some(BoardCommands::Title { title }) => commands::board::title(session, title, output),
    }
}

fn handle_column_command(
    command: ColumnCommands,
    session: &mut FileSession,
    output: &Output,
) -> Result<()> {
    match command {
        ColumnCommands::Add { title, theme } => {
            commands::column::add(session, title, theme, output)
        }
        ColumnCommands::List => commands::column::list(session, output),
        ColumnCommands::Edit { id, title, theme } => {
            commands::column::edit(session, id, title, theme, output)
        }
        ColumnCommands::Delete { id } => commands::column::delete(session, id, output),
    }
}

fn handle_card_command(
    command: CardCommands,
    session: &mut FileSession,
    output: &Output,
) -> Result<()> {
    match command {
        CardCommands::Add {
            column,
            title,
            description,
            tag,
        } => commands::card::add(session, column, title, description, tag, output),
        CardCommands::Show { id } => commands::card::show(session, id, output),
        CardCommands::Edit {
            id,
            title,
            description,
            clear_description,
            editor,
            tags,
            clear_tags,
        } => {
            let description = if clear_description {
                commands::card::DescriptionEdit::Clear
            } else if editor {
                commands::card::DescriptionEdit::Editor
            } else {
                match description {
                    Some(text) => commands::card::DescriptionEdit::Set(text),
                    None => commands::card::DescriptionEdit::Keep,
                }
            };
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            commands::card::edit(session, id, title, description, tags, output)
        }
        CardCommands::Delete { id } => commands::card::delete(session, id, output),
        CardCommands::Move { id, to, position } => {
            commands::card::move_card(session, id, to, position, output)
        }
        CardCommands::Tag { id, tag } => commands::card::toggle_tag(session, id, tag, output),
    }
}

fn handle_tag_command(
    command: Option<TagCommands>,
    session: &mut FileSession,
    output: &Output,
) -> Result<()> {
    match command {
        Some(TagCommands::List) | None => commands::tag::list(session, output),
        Some(TagCommands::Add { tag }) => commands::tag::add(session, tag, output),
        Some(TagCommands::Remove { tag }) => commands::tag::remove(session, tag, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print a recovery hint when the failure came from the storage layer
fn report_storage_error(error: &anyhow::Error) {
    let suggestion = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::recovery_suggestion);

    if let Some(suggestion) = suggestion {
        eprintln!("Hint: {}", suggestion);
    }
}

/// Initialize file-based logging
///
/// Logs go to a file so they never mix with command output.
fn init_logging(config: &Config) {
    let log_path = config.log_path();

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // The binary's target is `atlas`, not the package name
    let env_filter = EnvFilter::new(format!(
        "atlas_core={},atlas={}",
        config.log_level, config.log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
