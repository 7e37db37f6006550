//! Command handlers

pub mod capture;
pub mod config;
pub mod daily;
pub mod interactive;
pub mod search;

use anyhow::{bail, Result};

use vaultkey_core::{Config, Vault};

/// Pick a configured vault by name, or the first one
pub fn select_vault(config: &Config, name: Option<&str>) -> Result<Vault> {
    let vaults = config.vaults();
    if vaults.is_empty() {
        bail!(
            "No vaults configured.\n\
             Set them with: vaultkey config set vaults \"/path/to/vault, /path/to/other\""
        );
    }

    match name {
        None => Ok(vaults[0].clone()),
        Some(name) => match vaults.iter().find(|v| v.name == name) {
            Some(vault) => Ok(vault.clone()),
            None => {
                let known: Vec<_> = vaults.iter().map(|v| v.name.as_str()).collect();
                bail!("No vault named '{}'. Configured: {}", name, known.join(", "));
            }
        },
    }
}

/// Open a URL with the system handler, or just print it
pub fn open_url(url: &str, print_only: bool, output: &crate::output::Output) -> Result<()> {
    output.print_url(url);
    if !print_only {
        open::that(url).map_err(|e| anyhow::anyhow!("Failed to open {}: {}", url, e))?;
    }
    Ok(())
}
