//! Deep links into the note application
//!
//! Links have the shape
//! `obsidian://<mode>?vault=<vault name>&file=<path relative to the vault>`
//! with both parameters percent-encoded and the path always using `/`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::daily::{resolve_daily_path, DailyPath};
use crate::error::DateFormatError;

/// URL scheme handled by the note application
pub const SCHEME: &str = "obsidian";

/// Note file extension
pub const NOTE_EXTENSION: &str = ".md";

/// What the link asks the note application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Open an existing note
    Open,
    /// Create the note, then open it
    New,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Open => "open",
            Mode::New => "new",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append `.md` unless the path already ends with it
pub fn with_note_extension(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(NOTE_EXTENSION) {
        path.to_path_buf()
    } else {
        let mut raw = path.as_os_str().to_os_string();
        raw.push(NOTE_EXTENSION);
        PathBuf::from(raw)
    }
}

/// `path` relative to `root`, joined with forward slashes
fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Build a link to a note file inside a vault
///
/// If the file is not inside `vault_root`, the link falls back to the bare
/// file name.
pub fn build_note_url(vault_name: &str, file_path: &Path, vault_root: &Path, mode: Mode) -> String {
    let file_path = with_note_extension(file_path);

    let file = match relative_slash_path(&file_path, vault_root) {
        Some(relative) => relative,
        None => {
            warn!(
                "File {:?} is not inside vault {:?}; falling back to file name",
                file_path, vault_root
            );
            file_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        }
    };

    format!(
        "{}://{}?vault={}&file={}",
        SCHEME,
        mode,
        urlencoding::encode(vault_name),
        urlencoding::encode(&file)
    )
}

/// Build a link to an already resolved daily note
///
/// Uses [`Mode::New`] while the note does not exist yet.
pub fn daily_note_url(vault_name: &str, vault_root: &Path, daily: &DailyPath) -> String {
    let mode = if daily.exists { Mode::Open } else { Mode::New };
    build_note_url(vault_name, &daily.path, vault_root, mode)
}

/// Build a link to today's daily note
pub fn build_daily_url(vault_name: &str, vault_root: &Path) -> Result<String, DateFormatError> {
    let daily = resolve_daily_path(vault_root)?;
    Ok(daily_note_url(vault_name, vault_root, &daily))
}
