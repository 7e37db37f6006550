//! Data models for vaultkey
//!
//! Defines the core data structures: Vault and Note.
//! Notes are read projections over Markdown files on disk and carry no
//! state of their own.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A directory tree of Markdown notes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vault {
    /// Display name (final segment of the root path)
    pub name: String,
    /// Root directory of the vault
    pub root: PathBuf,
}

impl Vault {
    /// Create a vault for the given root, deriving its name from the path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = name_from_root(&root);
        Self { name, root }
    }
}

fn name_from_root(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        // "/" or a path ending in ".." has no final segment
        None => root.to_string_lossy().into_owned(),
    }
}

/// A note found in a vault
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    /// File name without the extension
    pub name: String,
    /// Absolute path of the note file
    pub path: PathBuf,
    /// Preview text for content matches, otherwise the raw path
    pub description: String,
    /// Name of the vault the note was found in
    pub vault_name: String,
    /// Root directory of that vault
    pub vault_root: PathBuf,
}

impl Note {
    /// Create a note record whose description is its own path
    pub fn from_path(path: impl Into<PathBuf>, vault: &Vault) -> Self {
        let path = path.into();
        let description = path.to_string_lossy().into_owned();
        Self::with_description(path, description, vault)
    }

    /// Create a note record with a preview description
    pub fn with_description(
        path: impl Into<PathBuf>,
        description: impl Into<String>,
        vault: &Vault,
    ) -> Self {
        let path = path.into();
        Self {
            name: note_name(&path),
            path,
            description: description.into(),
            vault_name: vault.name.clone(),
            vault_root: vault.root.clone(),
        }
    }

    /// Whether the description is a content preview rather than the path
    pub fn has_preview(&self) -> bool {
        !self.description.is_empty() && Path::new(&self.description) != self.path.as_path()
    }
}

/// File name without extension, e.g. `/vault/notes/Idea.md` -> `Idea`
pub fn note_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
