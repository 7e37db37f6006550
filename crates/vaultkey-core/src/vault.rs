//! Vault configuration parsing

use crate::models::Vault;

/// Parse a comma-separated list of vault roots
///
/// Whitespace around the whole string and around each path is trimmed,
/// empty segments are dropped. Order is preserved; duplicates and
/// non-existent directories are kept as given.
pub fn parse_vaults(config: &str) -> Vec<Vault> {
    config
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(Vault::new)
        .collect()
}
