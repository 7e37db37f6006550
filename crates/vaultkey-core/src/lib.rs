//! vaultkey Core Library
//!
//! This crate provides the core functionality for vaultkey, a launcher
//! companion for Markdown note vaults: find notes by name or content, open
//! today's daily note, and capture text into notes without opening the
//! note application.
//!
//! # Architecture
//!
//! - **Vaults** are plain directories; nothing is indexed or cached, every
//!   query scans the files on disk
//! - **Deep links** (`obsidian://open?vault=..&file=..`) hand notes over to
//!   the note application
//! - **Launcher** owns the quick-capture session and answers host events
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let launcher = Launcher::new(config);
//!
//! match launcher.query("on", "meeting") {
//!     Response::Render(items) => { /* show items */ }
//!     Response::Open(url) => { /* open url */ }
//!     _ => {}
//! }
//! ```
//!
//! # Modules
//!
//! - `vault`: Parse the configured vault list
//! - `locator`: Search notes by name or content
//! - `daily`: Resolve today's daily note
//! - `url`: Build deep links
//! - `capture`: Append to and create notes; the capture session
//! - `launcher`: Keyword and action handling
//! - `config`: Application configuration

pub mod capture;
pub mod config;
pub mod daily;
pub mod error;
pub mod launcher;
pub mod locator;
pub mod models;
pub mod url;
pub mod vault;

pub use capture::{append_to_note, create_note_in_vault, CaptureSession, CaptureState};
pub use config::{Config, Keywords};
pub use daily::{resolve_daily_path, resolve_daily_settings, DailyPath, DailySettings};
pub use error::{CaptureError, DateFormatError, NoteError};
pub use launcher::{Action, ItemAction, Launcher, LauncherError, Response, ResultItem};
pub use locator::{find_by_content, find_by_name, merge_notes, search_vaults, SearchMode};
pub use models::{Note, Vault};
pub use url::{build_daily_url, build_note_url, daily_note_url, Mode};
pub use vault::parse_vaults;
