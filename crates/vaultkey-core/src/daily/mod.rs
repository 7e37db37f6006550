//! Daily notes
//!
//! Resolves where today's daily note lives in a vault:
//!
//! 1. Pick the settings source (periodic-notes plugin or core daily notes)
//! 2. Format the current local date with the configured pattern
//! 3. Join `vault / folder / <date>.md` and check whether it exists
//!
//! Nothing is cached; every call reads the settings and the filesystem again.

pub mod format;
pub mod settings;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DateFormatError;

pub use format::DateFormat;
pub use settings::{is_plugin_enabled, PERIODIC_NOTES_PLUGIN};

/// Default daily note file name pattern
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD";

/// Where daily notes go and how they are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySettings {
    /// moment-style date pattern
    pub format: String,
    /// Folder relative to the vault root, empty for the root itself
    pub folder: String,
}

impl Default for DailySettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            folder: String::new(),
        }
    }
}

/// Today's daily note location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPath {
    pub path: PathBuf,
    /// The formatted date used as the file name
    pub date: String,
    pub folder: String,
    /// Whether the file existed when this was resolved
    pub exists: bool,
}

/// Daily note settings for a vault
pub fn resolve_daily_settings(vault_root: &Path) -> DailySettings {
    if is_plugin_enabled(vault_root, PERIODIC_NOTES_PLUGIN) {
        debug!("Using periodic-notes settings for {:?}", vault_root);
        settings::periodic_notes_settings(vault_root)
    } else {
        settings::daily_notes_settings(vault_root)
    }
}

/// Today's daily note for a vault
pub fn resolve_daily_path(vault_root: &Path) -> Result<DailyPath, DateFormatError> {
    resolve_daily_path_on(vault_root, Local::now().naive_local())
}

/// The daily note for a vault at a given local date and time
pub fn resolve_daily_path_on(
    vault_root: &Path,
    at: NaiveDateTime,
) -> Result<DailyPath, DateFormatError> {
    let settings = resolve_daily_settings(vault_root);
    let date = DateFormat::parse(&settings.format)?.render(&at);

    // A leading slash would make the folder replace the vault root on join
    let folder = settings.folder.trim_matches('/');
    let mut path = vault_root.to_path_buf();
    if !folder.is_empty() {
        path.push(folder);
    }
    path.push(format!("{}.md", date));

    let exists = path.exists();
    debug!("Daily note for {:?}: {:?} (exists: {})", vault_root, path, exists);

    Ok(DailyPath {
        path,
        date,
        folder: settings.folder,
        exists,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn july_16() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, 16)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_defaults_without_config() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(resolve_daily_settings(temp_dir.path()), DailySettings::default());
    }

    #[test]
    fn test_daily_path_default_format() {
        let temp_dir = TempDir::new().unwrap();
        let daily = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap();

        assert_eq!(daily.path, temp_dir.path().join("2021-07-16.md"));
        assert_eq!(daily.date, "2021-07-16");
        assert_eq!(daily.folder, "");
        assert!(!daily.exists);
    }

    #[test]
    fn test_daily_path_exists_is_not_cached() {
        let temp_dir = TempDir::new().unwrap();

        let before = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap();
        assert!(!before.exists);

        fs::write(&before.path, "# 2021-07-16").unwrap();

        let after = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap();
        assert!(after.exists);
        assert_eq!(before.path, after.path);
    }

    #[test]
    fn test_daily_path_with_folder() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/daily-notes.json",
            r#"{"format": "YYYY/MM/DD", "folder": "/Journal/"}"#,
        );

        let daily = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap();
        assert_eq!(daily.path, temp_dir.path().join("Journal/2021/07/16.md"));
        assert_eq!(daily.date, "2021/07/16");
        assert_eq!(daily.folder, "/Journal/");
    }

    #[test]
    fn test_periodic_notes_take_precedence() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/daily-notes.json",
            r#"{"format": "DD-MM-YYYY", "folder": "Core"}"#,
        );
        write(
            temp_dir.path(),
            ".obsidian/community-plugins.json",
            r#"["periodic-notes"]"#,
        );
        write(
            temp_dir.path(),
            ".obsidian/plugins/periodic-notes/data.json",
            r#"{"daily": {"format": "YYYYMMDD", "folder": "Periodic"}}"#,
        );

        let daily = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap();
        assert_eq!(daily.path, temp_dir.path().join("Periodic/20210716.md"));
    }

    #[test]
    fn test_periodic_data_ignored_when_plugin_disabled() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/plugins/periodic-notes/data.json",
            r#"{"daily": {"format": "YYYYMMDD", "folder": "Periodic"}}"#,
        );

        let daily = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap();
        assert_eq!(daily.path, temp_dir.path().join("2021-07-16.md"));
    }

    #[test]
    fn test_unknown_format_token_fails() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            ".obsidian/daily-notes.json",
            r#"{"format": "YYYY-MM-DD-ZZ"}"#,
        );

        let err = resolve_daily_path_on(temp_dir.path(), july_16()).unwrap_err();
        assert!(matches!(err, DateFormatError::UnknownToken { .. }));
    }

    #[test]
    fn test_resolve_today() {
        let temp_dir = TempDir::new().unwrap();
        let daily = resolve_daily_path(temp_dir.path()).unwrap();
        let today = Local::now().format("%Y-%m-%d").to_string();

        // Allow for the date rolling over between the two calls
        if daily.date == today {
            assert_eq!(daily.path, temp_dir.path().join(format!("{}.md", today)));
        }
    }
}
