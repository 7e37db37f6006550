//! Daily note command handler

use anyhow::{Context, Result};

use vaultkey_core::{daily_note_url, resolve_daily_path, Config};

use super::{open_url, select_vault};
use crate::output::Output;

/// Show today's daily note and open it in the note application
pub fn open(config: &Config, vault: Option<&str>, print_only: bool, output: &Output) -> Result<()> {
    let vault = select_vault(config, vault)?;
    let daily = resolve_daily_path(&vault.root)
        .with_context(|| format!("Failed to resolve daily note for vault '{}'", vault.name))?;

    let url = daily_note_url(&vault.name, &vault.root, &daily);

    if print_only {
        output.print_daily(&daily, &url);
        return Ok(());
    }
    open_url(&url, false, output)
}
