//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use vaultkey_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "vaults": config.vaults(),
                    "keywords": config.keywords,
                    "result_limit": config.result_limit,
                    "quick_capture_note": config.quick_capture_note,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            for vault in config.vaults() {
                println!("{}", vault.root.display());
            }
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            let vaults = config.vaults();
            if vaults.is_empty() {
                println!("  vaults:             (not set)");
            } else {
                println!("  vaults:");
                for vault in &vaults {
                    println!("    {} ({})", vault.name, vault.root.display());
                }
            }
            println!("  keywords:");
            println!("    search:         {}", config.keywords.search);
            println!("    search_content: {}", config.keywords.search_content);
            println!("    daily:          {}", config.keywords.daily);
            println!("    capture:        {}", config.keywords.capture);
            println!("  result_limit:       {}", config.result_limit);
            println!(
                "  quick_capture_note: {}",
                if config.quick_capture_note.is_empty() {
                    "(daily note)"
                } else {
                    &config.quick_capture_note
                }
            );
            println!(
                "  log_file:           {}",
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

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "vaults" => config.vaults = value.to_string(),
        "result_limit" => {
            config.result_limit = value
                .parse()
                .context("Invalid value for result_limit. Use a whole number.")?;
        }
        "quick_capture_note" => {
            config.quick_capture_note = if value == "none" {
                String::new()
            } else {
                value.to_string()
            };
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "keywords.search" => config.keywords.search = keyword(value)?,
        "keywords.search_content" => config.keywords.search_content = keyword(value)?,
        "keywords.daily" => config.keywords.daily = keyword(value)?,
        "keywords.capture" => config.keywords.capture = keyword(value)?,
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: vaults, result_limit, quick_capture_note, log_file,\n\
                 keywords.search, keywords.search_content, keywords.daily, keywords.capture",
                key
            );
        }
    }
    Ok(())
}

fn keyword(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || value.contains(char::is_whitespace) {
        bail!("Keywords must be a single word");
    }
    Ok(value.to_string())
}
