//! Quick capture
//!
//! File operations for adding text to notes, and the session that carries
//! captured text across interaction turns while the user picks a target
//! note:
//!
//! ```text
//! Default --start_capture--> AwaitingNoteSelection
//! AwaitingNoteSelection --select_note / create_note--> Default
//! any --cancel--> Default
//! ```
//!
//! Every failed transition also lands in `Default`, so a session can never
//! get stuck waiting for a selection.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::daily::resolve_daily_path;
use crate::error::{CaptureError, NoteError, NoteResult};
use crate::models::Note;
use crate::url::{with_note_extension, NOTE_EXTENSION};

/// Separator written before appended text
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Append text to a note in a vault
///
/// `target` may be an absolute path, a path relative to the vault root, or
/// blank for today's daily note. `.md` is added when missing. The note file
/// is created if absent but its folder must exist. Returns the note path.
pub fn append_to_note(vault_root: &Path, target: &str, content: &str) -> NoteResult<PathBuf> {
    let path = if target.trim().is_empty() {
        resolve_daily_path(vault_root)?.path
    } else {
        let target = Path::new(target);
        if target.is_absolute() {
            with_note_extension(target)
        } else {
            with_note_extension(&vault_root.join(target))
        }
    };

    info!("Appending to note {:?} in vault {:?}", path, vault_root);

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .map_err(|e| NoteError::from_io(e, path.clone()))?;
    write!(file, "{}{}", LINE_ENDING, content).map_err(|e| NoteError::from_io(e, path.clone()))?;

    Ok(path)
}

/// Create `<vault_root>/<name>.md` with a `# <name>` heading
///
/// An existing note is left untouched and its path returned. Names with
/// path separators or `..` are rejected so the note stays in the vault.
pub fn create_note_in_vault(vault_root: &Path, name: &str) -> NoteResult<PathBuf> {
    if !is_plain_name(name) {
        return Err(NoteError::InvalidName {
            name: name.to_string(),
        });
    }
    let path = vault_root.join(format!("{}{}", name, NOTE_EXTENSION));

    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => {
            write!(file, "# {}", name).map_err(|e| NoteError::from_io(e, path.clone()))?;
            info!("Created note {:?}", path);
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            info!("Note {:?} already exists", path);
        }
        Err(e) => return Err(NoteError::from_io(e, path)),
    }

    Ok(path)
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(['/', '\\'])
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
}

/// Where the session is in the capture workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Default,
    /// Text has been captured and the user is choosing a note for it
    AwaitingNoteSelection,
}

/// Capture state for one launcher session
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
    pending: String,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Captured text waiting for a target note
    pub fn pending_content(&self) -> Option<&str> {
        match self.state {
            CaptureState::AwaitingNoteSelection => Some(&self.pending),
            CaptureState::Default => None,
        }
    }

    pub fn is_awaiting_selection(&self) -> bool {
        self.state == CaptureState::AwaitingNoteSelection
    }

    /// Hold `content` until a note is selected
    ///
    /// Replaces any text captured earlier in the session.
    pub fn start_capture(&mut self, content: impl Into<String>) -> Result<(), CaptureError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(self.fail(CaptureError::EmptyContent));
        }
        self.state = CaptureState::AwaitingNoteSelection;
        self.pending = content;
        Ok(())
    }

    /// Append the captured text to an existing note
    pub fn select_note(&mut self, note: &Note) -> Result<PathBuf, CaptureError> {
        let content = self.take_pending()?;
        if note.path.as_os_str().is_empty() {
            return Err(self.fail(CaptureError::MissingNotePath));
        }
        if note.vault_root.as_os_str().is_empty() {
            return Err(self.fail(CaptureError::MissingVault));
        }

        let target = note.path.to_string_lossy();
        append_to_note(&note.vault_root, &target, &content).map_err(|e| self.fail(e.into()))
    }

    /// Create a note (unless it exists) and append the captured text to it
    pub fn create_note(&mut self, name: &str, vault_root: &Path) -> Result<PathBuf, CaptureError> {
        let content = self.take_pending()?;
        if name.trim().is_empty() {
            return Err(self.fail(CaptureError::EmptyNoteName));
        }
        if vault_root.as_os_str().is_empty() {
            return Err(self.fail(CaptureError::MissingVault));
        }

        let path = create_note_in_vault(vault_root, name).map_err(|e| self.fail(e.into()))?;
        let target = path.to_string_lossy();
        append_to_note(vault_root, &target, &content).map_err(|e| self.fail(e.into()))
    }

    /// Drop any captured text
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = CaptureState::Default;
        self.pending.clear();
    }

    /// Take the captured text and reset, failing if nothing was captured
    fn take_pending(&mut self) -> Result<String, CaptureError> {
        if !self.is_awaiting_selection() {
            return Err(self.fail(CaptureError::NotAwaitingSelection));
        }
        let content = std::mem::take(&mut self.pending);
        self.reset();
        if content.trim().is_empty() {
            return Err(self.fail(CaptureError::EmptyContent));
        }
        Ok(content)
    }

    fn fail(&mut self, error: CaptureError) -> CaptureError {
        warn!("Quick capture failed: {}", error);
        self.reset();
        error
    }
}
