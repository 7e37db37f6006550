//! Search command handlers

use anyhow::{bail, Result};

use vaultkey_core::{search_vaults, Config, SearchMode};

use crate::output::Output;

/// Search notes by name across all vaults
pub fn by_name(config: &Config, query: &str, limit: Option<usize>, output: &Output) -> Result<()> {
    run(config, query, SearchMode::Name, limit, output)
}

/// Search note contents across all vaults
pub fn by_content(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Search text cannot be empty");
    }
    run(config, query, SearchMode::Content, limit, output)
}

fn run(
    config: &Config,
    query: &str,
    mode: SearchMode,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let vaults = config.vaults();
    if vaults.is_empty() {
        output.message("No vaults configured. Set them with: vaultkey config set vaults <paths>");
        return Ok(());
    }

    let notes = search_vaults(&vaults, query, mode, limit.unwrap_or(config.result_limit));
    output.print_notes(&notes);
    Ok(())
}
