//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use atlas_core::Config;

use crate::output::{Output, OutputFormat};

/// Log levels accepted by `config set log_level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "board_file": config.board_file,
                    "log_level": config.log_level,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.board_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:   {}", config.data_dir.display());
            println!("  board_file: {}", config.board_file);
            println!("  log_level:  {}", config.log_level);
            println!(
                "  log_file:   {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "board_file" => {
            if value.trim().is_empty() {
                bail!("board_file cannot be empty");
            }
            config.board_file = value.trim().to_string();
        }
        "log_level" => {
            let level = value.trim().to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                bail!(
                    "Invalid value for log_level. Use one of: {}",
                    LOG_LEVELS.join(", ")
                );
            }
            config.log_level = level;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, board_file, log_level, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();

        apply_setting(&mut config, "board_file", "team.json").unwrap();
        assert_eq!(config.board_file, "team.json");

        apply_setting(&mut config, "log_level", "DEBUG").unwrap();
        assert_eq!(config.log_level, "debug");

        apply_setting(&mut config, "log_file", "/tmp/atlas.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/atlas.log")));
        apply_setting(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "log_level", "loud").is_err());
        assert!(apply_setting(&mut config, "board_file", " ").is_err());
        assert!(apply_setting(&mut config, "sync_url", "ws://x").is_err());
    }
}
