//! Vault-local daily note settings
//!
//! Settings live in the vault's `.obsidian` directory. When the
//! periodic-notes community plugin is enabled its `daily` section wins;
//! otherwise the core daily-notes config is used. Every file is optional.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::DailySettings;

/// Vault configuration directory
pub const CONFIG_DIR: &str = ".obsidian";

/// Plugin whose settings take over daily note resolution
pub const PERIODIC_NOTES_PLUGIN: &str = "periodic-notes";

/// A value read from an optional file, with the reason it fell back to the
/// default (if it did)
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub diagnostic: Option<String>,
}

/// Read and parse a JSON file, falling back to `T::default()`
///
/// A missing file is the normal case and yields no diagnostic. Read and
/// parse failures are reported in `diagnostic`.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Loaded<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Loaded {
                value: T::default(),
                diagnostic: None,
            };
        }
        Err(e) => {
            return Loaded {
                value: T::default(),
                diagnostic: Some(format!("Failed to read {:?}: {}", path, e)),
            };
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Loaded {
            value,
            diagnostic: None,
        },
        Err(e) => Loaded {
            value: T::default(),
            diagnostic: Some(format!("Failed to parse {:?}: {}", path, e)),
        },
    }
}

fn load<T: DeserializeOwned + Default>(path: &Path) -> T {
    let loaded = read_json_or_default(path);
    match loaded.diagnostic {
        Some(diagnostic) => warn!("{}; using defaults", diagnostic),
        None => debug!("Loaded {:?}", path),
    }
    loaded.value
}

/// `daily-notes.json`, also the shape of periodic-notes' `daily` section
#[derive(Debug, Default, Deserialize)]
struct DailyNotesConfig {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    folder: Option<String>,
}

impl From<DailyNotesConfig> for DailySettings {
    fn from(config: DailyNotesConfig) -> Self {
        let defaults = DailySettings::default();
        Self {
            format: non_blank(config.format).unwrap_or(defaults.format),
            folder: non_blank(config.folder).unwrap_or(defaults.folder),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `plugins/periodic-notes/data.json`
#[derive(Debug, Default, Deserialize)]
struct PeriodicNotesConfig {
    #[serde(default)]
    daily: DailyNotesConfig,
}

/// Plugin lists are either an array of ids or a map of id to enabled flag
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PluginList {
    Ids(Vec<String>),
    Flags(BTreeMap<String, bool>),
}

impl Default for PluginList {
    fn default() -> Self {
        PluginList::Ids(Vec::new())
    }
}

impl PluginList {
    fn contains(&self, name: &str) -> bool {
        match self {
            PluginList::Ids(ids) => ids.iter().any(|id| id == name),
            PluginList::Flags(flags) => flags.get(name).copied().unwrap_or(false),
        }
    }
}

fn config_path(vault_root: &Path, parts: &[&str]) -> PathBuf {
    let mut path = vault_root.join(CONFIG_DIR);
    path.extend(parts);
    path
}

/// Whether a core or community plugin is enabled for the vault
pub fn is_plugin_enabled(vault_root: &Path, name: &str) -> bool {
    ["core-plugins.json", "community-plugins.json"]
        .into_iter()
        .any(|file| load::<PluginList>(&config_path(vault_root, &[file])).contains(name))
}

/// Settings from the core daily-notes config
pub fn daily_notes_settings(vault_root: &Path) -> DailySettings {
    load::<DailyNotesConfig>(&config_path(vault_root, &["daily-notes.json"])).into()
}

/// Settings from the periodic-notes plugin's `daily` section
pub fn periodic_notes_settings(vault_root: &Path) -> DailySettings {
    let path = config_path(
        vault_root,
        &["plugins", PERIODIC_NOTES_PLUGIN, "data.json"],
    );
    load::<PeriodicNotesConfig>(&path).daily.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_read_json_missing_file_has_no_diagnostic() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Loaded<Vec<String>> = read_json_or_default(&temp_dir.path().join("none.json"));

        assert!(loaded.value.is_empty());
        assert!(loaded.diagnostic.is_none());
    }

    #[test]
    fn test_read_json_malformed_file_reports() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "bad.json", "{ not json");
        let loaded: Loaded<Vec<String>> = read_json_or_default(&temp_dir.path().join("bad.json"));

        assert!(loaded.value.is_empty());
        assert!(loaded.diagnostic.unwrap().contains("Failed to parse"));
    }

    #[test]
    fn test_plugin_enabled_from_community_list() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/community-plugins.json",
            r#"["calendar", "periodic-notes"]"#,
        );

        assert!(is_plugin_enabled(temp_dir.path(), PERIODIC_NOTES_PLUGIN));
        assert!(!is_plugin_enabled(temp_dir.path(), "dataview"));
    }

    #[test]
    fn test_plugin_enabled_from_core_flag_map() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/core-plugins.json",
            r#"{"daily-notes": true, "canvas": false}"#,
        );

        assert!(is_plugin_enabled(temp_dir.path(), "daily-notes"));
        assert!(!is_plugin_enabled(temp_dir.path(), "canvas"));
    }

    #[test]
    fn test_plugin_lists_unreadable_means_absent() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), ".obsidian/core-plugins.json", "garbage");
        write(temp_dir.path(), ".obsidian/community-plugins.json", "42");

        assert!(!is_plugin_enabled(temp_dir.path(), PERIODIC_NOTES_PLUGIN));
    }

    #[test]
    fn test_daily_notes_settings() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/daily-notes.json",
            r#"{"format": "DD.MM.YYYY", "folder": "Journal", "template": "x"}"#,
        );

        let settings = daily_notes_settings(temp_dir.path());
        assert_eq!(settings.format, "DD.MM.YYYY");
        assert_eq!(settings.folder, "Journal");
    }

    #[test]
    fn test_blank_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/daily-notes.json",
            r#"{"format": "", "folder": "Daily"}"#,
        );

        let settings = daily_notes_settings(temp_dir.path());
        assert_eq!(settings.format, "YYYY-MM-DD");
        assert_eq!(settings.folder, "Daily");
    }

    #[test]
    fn test_periodic_notes_settings() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/plugins/periodic-notes/data.json",
            r#"{"daily": {"format": "YYYY/MM/DD", "folder": "Periodic", "enabled": true}, "weekly": {}}"#,
        );

        let settings = periodic_notes_settings(temp_dir.path());
        assert_eq!(settings.format, "YYYY/MM/DD");
        assert_eq!(settings.folder, "Periodic");
    }

    #[test]
    fn test_periodic_notes_without_daily_section() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/plugins/periodic-notes/data.json",
            r#"{"weekly": {"format": "gggg-[W]ww"}}"#,
        );

        assert_eq!(periodic_notes_settings(temp_dir.path()), DailySettings::default());
    }
}
