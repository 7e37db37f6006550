//! Launcher event handling
//!
//! [`Launcher`] turns the two events a launcher host delivers into results:
//!
//! - a keyword query (`query`) renders a list of [`ResultItem`]s or asks the
//!   host to open a URL
//! - selecting an item (`enter`) runs the item's [`Action`]
//!
//! The launcher owns the [`CaptureSession`], so the capture workflow spans
//! turns without any global state. Hosts deliver events one at a time.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::capture::{append_to_note, create_note_in_vault, CaptureSession};
use crate::config::Config;
use crate::error::{CaptureError, NoteError};
use crate::locator::{search_vaults, SearchMode};
use crate::models::{Note, Vault};
use crate::url::{build_daily_url, build_note_url, Mode};

/// Errors raised while handling a launcher event
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Invalid action: {0}")]
    InvalidAction(&'static str),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Note(#[from] NoteError),
}

/// What selecting an item does
///
/// Build actions with the constructors, which reject missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    /// Abandon the current operation
    Cancel,
    /// Create a note in a vault
    CreateNote { name: String, vault_root: PathBuf },
    /// Append text to the quick-capture note of a vault
    QuickCapture { content: String, vault_root: PathBuf },
    /// Hold text and let the user pick the note it goes to
    QuickCaptureToNote { content: String },
    /// A note was picked from a result list
    SelectNote { note: Note },
}

impl Action {
    pub fn create_note(
        name: impl Into<String>,
        vault_root: impl Into<PathBuf>,
    ) -> Result<Self, LauncherError> {
        let name = name.into();
        let vault_root = vault_root.into();
        if name.trim().is_empty() {
            return Err(LauncherError::InvalidAction("note name is empty"));
        }
        require_vault(&vault_root)?;
        Ok(Action::CreateNote { name, vault_root })
    }

    pub fn quick_capture(
        content: impl Into<String>,
        vault_root: impl Into<PathBuf>,
    ) -> Result<Self, LauncherError> {
        let content = require_content(content.into())?;
        let vault_root = vault_root.into();
        require_vault(&vault_root)?;
        Ok(Action::QuickCapture {
            content,
            vault_root,
        })
    }

    pub fn quick_capture_to_note(content: impl Into<String>) -> Result<Self, LauncherError> {
        let content = require_content(content.into())?;
        Ok(Action::QuickCaptureToNote { content })
    }

    pub fn select_note(note: Note) -> Result<Self, LauncherError> {
        if note.path.as_os_str().is_empty() {
            return Err(LauncherError::InvalidAction("note has no path"));
        }
        require_vault(&note.vault_root)?;
        Ok(Action::SelectNote { note })
    }
}

fn require_content(content: String) -> Result<String, LauncherError> {
    if content.trim().is_empty() {
        Err(LauncherError::InvalidAction("captured text is empty"))
    } else {
        Ok(content)
    }
}

fn require_vault(vault_root: &Path) -> Result<(), LauncherError> {
    if vault_root.as_os_str().is_empty() {
        Err(LauncherError::InvalidAction("no target vault"))
    } else {
        Ok(())
    }
}

/// What happens when an item is selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ItemAction {
    /// Open a URL
    Open(String),
    /// Hand the action back to [`Launcher::enter`]
    Custom(Action),
}

/// One entry in a result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub title: String,
    pub description: String,
    /// `None` for purely informational items
    pub on_enter: Option<ItemAction>,
}

impl ResultItem {
    fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            on_enter: None,
        }
    }

    fn with_action(
        title: impl Into<String>,
        description: impl Into<String>,
        action: ItemAction,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            on_enter: Some(action),
        }
    }
}

/// What the host should do after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Response {
    /// Show these items
    Render(Vec<ResultItem>),
    /// Open a URL
    Open(String),
    /// Replace the query text (keeping the launcher open)
    SetQuery(String),
    /// Close the launcher
    Hide,
    /// Leave everything as it is
    Nothing,
}

/// Handles launcher events for one session
pub struct Launcher {
    config: Config,
    session: CaptureSession,
}

impl Launcher {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: CaptureSession::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Handle a keyword query
    pub fn query(&self, keyword: &str, search: &str) -> Response {
        let vaults = self.config.vaults();
        if vaults.is_empty() {
            return Response::Render(vec![not_configured_item()]);
        }

        let limit = self.config.result_limit;
        let keywords = &self.config.keywords;

        if self.session.is_awaiting_selection() {
            let notes = search_vaults(&vaults, search, SearchMode::Name, limit);
            let mut items = select_note_items(notes);
            items.extend(create_note_items(search, &vaults));
            items.push(cancel_item());
            return Response::Render(items);
        }

        if keyword == keywords.search || keyword == keywords.search_content {
            let mode = if keyword == keywords.search {
                SearchMode::Name
            } else {
                SearchMode::Content
            };
            let notes = search_vaults(&vaults, search, mode, limit);
            let mut items = show_note_items(&notes);
            items.extend(create_note_items(search, &vaults));
            items.push(cancel_item());
            Response::Render(items)
        } else if keyword == keywords.daily {
            let vault = &vaults[0];
            match build_daily_url(&vault.name, &vault.root) {
                Ok(url) => Response::Open(url),
                Err(e) => {
                    warn!("Cannot resolve daily note for {:?}: {}", vault.root, e);
                    Response::Render(vec![ResultItem::info(
                        "Cannot open daily note",
                        e.to_string(),
                    )])
                }
            }
        } else if keyword == keywords.capture {
            Response::Render(quick_capture_items(search, &vaults[0]))
        } else {
            debug!("Ignoring unknown keyword {:?}", keyword);
            Response::Nothing
        }
    }

    /// Run the action of a selected item
    ///
    /// On error the capture session has already been reset.
    pub fn enter(&mut self, action: Action) -> Result<Response, LauncherError> {
        match action {
            Action::Cancel => {
                self.session.cancel();
                Ok(Response::SetQuery(String::new()))
            }
            Action::CreateNote { name, vault_root } => {
                if self.session.is_awaiting_selection() {
                    self.session.create_note(&name, &vault_root)?;
                    return Ok(Response::Hide);
                }
                let path = create_note_in_vault(&vault_root, &name)?;
                let vault = Vault::new(vault_root);
                Ok(Response::Open(build_note_url(
                    &vault.name,
                    &path,
                    &vault.root,
                    Mode::Open,
                )))
            }
            Action::QuickCapture {
                content,
                vault_root,
            } => {
                append_to_note(&vault_root, &self.config.quick_capture_note, &content)?;
                Ok(Response::Hide)
            }
            Action::QuickCaptureToNote { content } => {
                self.session.start_capture(content)?;
                Ok(Response::SetQuery(format!(
                    "{} ",
                    self.config.keywords.capture
                )))
            }
            Action::SelectNote { note } => {
                if self.session.is_awaiting_selection() {
                    self.session.select_note(&note)?;
                    return Ok(Response::Hide);
                }
                Ok(Response::Open(build_note_url(
                    &note.vault_name,
                    &note.path,
                    &note.vault_root,
                    Mode::Open,
                )))
            }
        }
    }

    /// The host is shutting down
    pub fn shutdown(&mut self) {
        self.session.cancel();
    }
}

fn not_configured_item() -> ResultItem {
    ResultItem::info(
        "Vaults Not Configured",
        "Set your vault paths (comma-separated) in the configuration.",
    )
}

fn cancel_item() -> ResultItem {
    ResultItem::with_action(
        "Cancel",
        "Cancel the current operation",
        ItemAction::Custom(Action::Cancel),
    )
}

fn vault_description(note: &Note) -> String {
    let location = format!("In vault: {}", note.vault_name);
    if note.has_preview() {
        format!("{} ({})", note.description, location)
    } else {
        location
    }
}

/// Items that open the given notes
pub fn show_note_items(notes: &[Note]) -> Vec<ResultItem> {
    notes
        .iter()
        .map(|note| {
            let url = build_note_url(&note.vault_name, &note.path, &note.vault_root, Mode::Open);
            ResultItem::with_action(&note.name, vault_description(note), ItemAction::Open(url))
        })
        .collect()
}

/// Items that pick a note as the quick-capture target
pub fn select_note_items(notes: Vec<Note>) -> Vec<ResultItem> {
    notes
        .into_iter()
        .filter_map(|note| {
            let title = note.name.clone();
            let description = vault_description(&note);
            match Action::select_note(note) {
                Ok(action) => Some(ResultItem::with_action(
                    title,
                    description,
                    ItemAction::Custom(action),
                )),
                Err(e) => {
                    warn!("Skipping note {:?}: {}", title, e);
                    None
                }
            }
        })
        .collect()
}

/// Items offering to create a note named `name`, one per vault
///
/// A blank name yields a single hint item for the first vault.
pub fn create_note_items(name: &str, vaults: &[Vault]) -> Vec<ResultItem> {
    let name = name.trim();
    if name.is_empty() {
        return match vaults.first() {
            Some(vault) => vec![ResultItem::info(
                format!("Create a new note in '{}' vault", vault.name),
                "Type a name to create a note in this vault.",
            )],
            None => vec![not_configured_item()],
        };
    }

    vaults
        .iter()
        .filter_map(|vault| {
            let action = Action::create_note(name, &vault.root).ok()?;
            Some(ResultItem::with_action(
                format!("Create '{}' in vault: {}", name, vault.name),
                format!(
                    "Creates a new note named '{}.md' in the '{}' vault.",
                    name, vault.name
                ),
                ItemAction::Custom(action),
            ))
        })
        .collect()
}

/// Quick-capture choices for `content`
pub fn quick_capture_items(content: &str, vault: &Vault) -> Vec<ResultItem> {
    let (Ok(to_daily), Ok(to_note)) = (
        Action::quick_capture(content, &vault.root),
        Action::quick_capture_to_note(content),
    ) else {
        return vec![ResultItem::info(
            "Quick Capture",
            "Type the text you want to capture.",
        )];
    };

    vec![
        ResultItem::with_action(
            format!("Quick Capture to Daily Note ({})", vault.name),
            format!("Append text to your daily note in the '{}' vault", vault.name),
            ItemAction::Custom(to_daily),
        ),
        ResultItem::with_action(
            "Quick Capture to existing note",
            "Search for and append text to an existing note in any vault",
            ItemAction::Custom(to_note),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureState, LINE_ENDING};
    use std::fs;
    use tempfile::TempDir;

    fn launcher_for(dirs: &[&TempDir]) -> Launcher {
        let vaults = dirs
            .iter()
            .map(|d| d.path().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(",");
        Launcher::new(Config {
            vaults,
            ..Config::default()
        })
    }

    fn items(response: Response) -> Vec<ResultItem> {
        match response {
            Response::Render(items) => items,
            other => panic!("expected items, got {:?}", other),
        }
    }

    fn custom_action(item: &ResultItem) -> Action {
        match &item.on_enter {
            Some(ItemAction::Custom(action)) => action.clone(),
            other => panic!("expected custom action, got {:?}", other),
        }
    }

    #[test]
    fn test_not_configured() {
        let launcher = Launcher::new(Config::default());
        let items = items(launcher.query("on", "x"));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Vaults Not Configured");
        assert!(items[0].on_enter.is_none());
    }

    #[test]
    fn test_unknown_keyword() {
        let dir = TempDir::new().unwrap();
        let launcher = launcher_for(&[&dir]);
        assert_eq!(launcher.query("zz", "x"), Response::Nothing);
    }

    #[test]
    fn test_search_renders_notes_create_and_cancel() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Hello.md"), "").unwrap();
        let launcher = launcher_for(&[&dir]);

        let items = items(launcher.query("on", "Hello"));
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Hello");
        assert!(items[0].description.starts_with("In vault: "));
        match &items[0].on_enter {
            Some(ItemAction::Open(url)) => assert!(url.ends_with("&file=Hello.md")),
            other => panic!("unexpected action {:?}", other),
        }
        assert!(items[1].title.starts_with("Create 'Hello' in vault: "));
        assert_eq!(items[2].title, "Cancel");
    }

    #[test]
    fn test_search_limit_is_global() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(first.path().join(format!("{}.md", name)), "").unwrap();
            fs::write(second.path().join(format!("{}.md", name)), "").unwrap();
        }
        let mut launcher = launcher_for(&[&first, &second]);
        launcher.config.result_limit = 4;

        let items = items(launcher.query("on", ""));
        let notes: Vec<_> = items
            .iter()
            .filter(|i| matches!(i.on_enter, Some(ItemAction::Open(_))))
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(notes, vec!["a", "a", "b", "b"]);
    }

    #[test]
    fn test_content_search_shows_preview() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Shopping.md"), "remember to buy milk").unwrap();
        let launcher = launcher_for(&[&dir]);

        let items = items(launcher.query("os", "milk"));
        assert_eq!(items[0].title, "Shopping");
        assert!(items[0]
            .description
            .starts_with("remember to buy milk (In vault: "));
    }

    #[test]
    fn test_create_note_items_blank_name() {
        let vaults = vec![Vault::new("/v/Main"), Vault::new("/v/Other")];
        let items = create_note_items("  ", &vaults);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Create a new note in 'Main' vault");
        assert!(items[0].on_enter.is_none());
    }

    #[test]
    fn test_create_note_items_one_per_vault() {
        let vaults = vec![Vault::new("/v/Main"), Vault::new("/v/Other")];
        let items = create_note_items("Plan", &vaults);

        assert_eq!(items.len(), 2);
        assert_eq!(
            custom_action(&items[1]),
            Action::CreateNote {
                name: "Plan".to_string(),
                vault_root: PathBuf::from("/v/Other"),
            }
        );
    }

    #[test]
    fn test_daily_keyword_opens_url() {
        let dir = TempDir::new().unwrap();
        let launcher = launcher_for(&[&dir]);

        match launcher.query("od", "") {
            Response::Open(url) => assert!(url.starts_with("obsidian://new?vault=")),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_daily_keyword_bad_format_is_informational() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".obsidian")).unwrap();
        fs::write(
            dir.path().join(".obsidian/daily-notes.json"),
            r#"{"format": "ZZZ"}"#,
        )
        .unwrap();
        let launcher = launcher_for(&[&dir]);

        let items = items(launcher.query("od", ""));
        assert_eq!(items[0].title, "Cannot open daily note");
    }

    #[test]
    fn test_capture_items() {
        let dir = TempDir::new().unwrap();
        let launcher = launcher_for(&[&dir]);

        let items = items(launcher.query("oq", "buy milk"));
        assert_eq!(items.len(), 2);
        assert!(matches!(custom_action(&items[0]), Action::QuickCapture { .. }));
        assert!(matches!(
            custom_action(&items[1]),
            Action::QuickCaptureToNote { .. }
        ));

        let items = quick_capture_items("", &Vault::new(dir.path()));
        assert_eq!(items.len(), 1);
        assert!(items[0].on_enter.is_none());
    }

    #[test]
    fn test_quick_capture_appends_to_configured_note() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Inbox.md"), "# Inbox").unwrap();
        let mut launcher = launcher_for(&[&dir]);
        launcher.config.quick_capture_note = "Inbox".to_string();

        let action = Action::quick_capture("call Sam", dir.path()).unwrap();
        assert_eq!(launcher.enter(action).unwrap(), Response::Hide);
        assert_eq!(
            fs::read_to_string(dir.path().join("Inbox.md")).unwrap(),
            format!("# Inbox{}call Sam", LINE_ENDING)
        );
    }

    #[test]
    fn test_capture_to_note_flow() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Groceries.md"), "# Groceries").unwrap();
        let mut launcher = launcher_for(&[&dir]);

        let action = Action::quick_capture_to_note("buy milk").unwrap();
        assert_eq!(
            launcher.enter(action).unwrap(),
            Response::SetQuery("oq ".to_string())
        );
        assert_eq!(
            launcher.session().state(),
            CaptureState::AwaitingNoteSelection
        );

        // Any keyword now lists notes to pick from
        let items = items(launcher.query("oq", "groc"));
        let select = custom_action(&items[0]);
        assert!(matches!(select, Action::SelectNote { .. }));

        assert_eq!(launcher.enter(select).unwrap(), Response::Hide);
        assert_eq!(launcher.session().state(), CaptureState::Default);
        assert!(fs::read_to_string(dir.path().join("Groceries.md"))
            .unwrap()
            .ends_with("buy milk"));
    }

    #[test]
    fn test_capture_to_new_note() {
        let dir = TempDir::new().unwrap();
        let mut launcher = launcher_for(&[&dir]);

        launcher
            .enter(Action::quick_capture_to_note("idea").unwrap())
            .unwrap();
        let action = Action::create_note("Ideas", dir.path()).unwrap();
        assert_eq!(launcher.enter(action).unwrap(), Response::Hide);

        assert_eq!(
            fs::read_to_string(dir.path().join("Ideas.md")).unwrap(),
            format!("# Ideas{}idea", LINE_ENDING)
        );
        assert!(!launcher.session().is_awaiting_selection());
    }

    #[test]
    fn test_create_note_outside_capture_opens_it() {
        let dir = TempDir::new().unwrap();
        let mut launcher = launcher_for(&[&dir]);

        let action = Action::create_note("Fresh Start", dir.path()).unwrap();
        match launcher.enter(action).unwrap() {
            Response::Open(url) => {
                assert!(url.starts_with("obsidian://open?vault="));
                assert!(url.ends_with("&file=Fresh%20Start.md"));
            }
            other => panic!("unexpected response {:?}", other),
        }
        assert_eq!(
            fs::read_to_string(dir.path().join("Fresh Start.md")).unwrap(),
            "# Fresh Start"
        );
    }

    #[test]
    fn test_select_note_outside_capture_opens_it() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        let mut launcher = launcher_for(&[&dir]);

        let note = Note::from_path(dir.path().join("sub/Idea.md"), &vault);
        let response = launcher.enter(Action::select_note(note).unwrap()).unwrap();
        assert_eq!(
            response,
            Response::Open(format!(
                "obsidian://open?vault={}&file=sub%2FIdea.md",
                urlencoding::encode(&vault.name)
            ))
        );
    }

    #[test]
    fn test_cancel_resets_session() {
        let dir = TempDir::new().unwrap();
        let mut launcher = launcher_for(&[&dir]);

        launcher
            .enter(Action::quick_capture_to_note("draft").unwrap())
            .unwrap();
        assert_eq!(
            launcher.enter(Action::Cancel).unwrap(),
            Response::SetQuery(String::new())
        );
        assert_eq!(launcher.session().pending_content(), None);
    }

    #[test]
    fn test_failed_append_resets_session() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        let mut launcher = launcher_for(&[&dir]);

        launcher
            .enter(Action::quick_capture_to_note("text").unwrap())
            .unwrap();
        let missing = Note::from_path(dir.path().join("nowhere/Gone.md"), &vault);
        let err = launcher
            .enter(Action::select_note(missing).unwrap())
            .unwrap_err();

        assert!(matches!(err, LauncherError::Capture(_)));
        assert!(!launcher.session().is_awaiting_selection());
    }

    #[test]
    fn test_shutdown_resets_session() {
        let mut launcher = Launcher::new(Config::default());
        launcher
            .enter(Action::quick_capture_to_note("text").unwrap())
            .unwrap();

        launcher.shutdown();
        assert_eq!(launcher.session().state(), CaptureState::Default);
    }

    #[test]
    fn test_action_constructors_validate() {
        assert!(Action::create_note("", "/v").is_err());
        assert!(Action::create_note("Name", "").is_err());
        assert!(Action::quick_capture(" ", "/v").is_err());
        assert!(Action::quick_capture("text", "").is_err());
        assert!(Action::quick_capture_to_note("").is_err());

        let mut note = Note::from_path("/v/a.md", &Vault::new("/v"));
        note.vault_root = PathBuf::new();
        assert!(Action::select_note(note).is_err());
    }

    #[test]
    fn test_action_serializes_with_type_tag() {
        let json = serde_json::to_value(Action::quick_capture_to_note("hi").unwrap()).unwrap();
        assert_eq!(json["type"], "quick-capture-to-note");
        assert_eq!(json["content"], "hi");
    }
}
