//! Capture command handlers
//!
//! Appending to and creating notes from the command line.

use anyhow::{bail, Context, Result};

use vaultkey_core::{append_to_note, build_note_url, create_note_in_vault, Config, Mode};

use super::{open_url, select_vault};
use crate::output::Output;

/// Quick capture: append text to the configured capture note
///
/// `note` overrides the configured target; a blank target means today's
/// daily note.
pub fn quick(
    config: &Config,
    text: &str,
    note: Option<&str>,
    vault: Option<&str>,
    output: &Output,
) -> Result<()> {
    let target = note.unwrap_or(&config.quick_capture_note);
    append(config, target, text, vault, output)
}

/// Append text to a note (name, vault-relative path or absolute path)
pub fn append(
    config: &Config,
    target: &str,
    text: &str,
    vault: Option<&str>,
    output: &Output,
) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Nothing to capture: text is empty");
    }
    let vault = select_vault(config, vault)?;

    let path = append_to_note(&vault.root, target, text)
        .with_context(|| format!("Failed to append to note in vault '{}'", vault.name))?;

    output.success(&format!("Appended to {}", path.display()));
    Ok(())
}

/// Create a note (if missing) and open it
pub fn create(
    config: &Config,
    name: &str,
    vault: Option<&str>,
    print_only: bool,
    output: &Output,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Note name cannot be empty");
    }
    let vault = select_vault(config, vault)?;

    let path = create_note_in_vault(&vault.root, name)
        .with_context(|| format!("Failed to create note '{}'", name))?;
    output.success(&format!("Note ready: {}", path.display()));

    let url = build_note_url(&vault.name, &path, &vault.root, Mode::Open);
    open_url(&url, print_only, output)
}
