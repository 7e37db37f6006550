//! Error types
//!
//! Typed errors for note file operations, daily-note date formats and the
//! capture workflow, with descriptive messages and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing note files
#[derive(Error, Debug)]
pub enum NoteError {
    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The note (or its parent directory) does not exist
    #[error("Note not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Failed to write note file
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A note name that would resolve outside the vault root
    #[error("Invalid note name '{name}': names cannot contain folders or '..'")]
    InvalidName { name: String },

    /// The daily note location could not be resolved
    #[error(transparent)]
    DailyPath(#[from] DateFormatError),
}

impl NoteError {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => NoteError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => NoteError::NotFound { path },
            _ if is_disk_full_error(&error) => NoteError::DiskFull {
                path,
                source: error,
            },
            _ => NoteError::Write {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            NoteError::DiskFull { .. } => Some("Free up disk space and try again."),
            NoteError::PermissionDenied { .. } => {
                Some("Check file and directory permissions of the vault.")
            }
            NoteError::NotFound { .. } => {
                Some("Check that the note's folder exists inside the vault.")
            }
            NoteError::InvalidName { .. } => {
                Some("Use a plain note name without '/', '\\' or '..'.")
            }
            NoteError::DailyPath(_) => {
                Some("Fix the daily note format in the vault's daily note settings.")
            }
            NoteError::Write { .. } => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// A daily note format string that cannot be translated to a date pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("Unsupported token '{token}' in date format '{format}'")]
    UnknownToken { token: String, format: String },

    #[error("Unterminated literal '[' in date format '{format}'")]
    UnterminatedLiteral { format: String },
}

/// Errors raised by the quick-capture workflow
///
/// Every variant leaves the capture session reset to its default state.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Nothing to capture: captured text is empty")]
    EmptyContent,

    #[error("No note selection in progress")]
    NotAwaitingSelection,

    #[error("Note name cannot be empty")]
    EmptyNoteName,

    #[error("No target vault given")]
    MissingVault,

    #[error("No note path given")]
    MissingNotePath,

    #[error(transparent)]
    Note(#[from] NoteError),
}

/// Result type for note file operations
pub type NoteResult<T> = Result<T, NoteError>;
