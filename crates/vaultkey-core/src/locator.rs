//! Note lookup across vaults
//!
//! Two searches are provided, each scoped to a single vault:
//!
//! - [`find_by_name`]: fuzzy-ranked match against file names
//! - [`find_by_content`]: case-insensitive substring match with a preview
//!
//! Callers run a search over every configured vault and combine the results
//! with [`merge_notes`]; [`search_vaults`] does both and applies the display
//! limit to the merged list.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::models::{Note, Vault};

/// Characters of context kept on each side of a content match
pub const CONTEXT_SIZE: usize = 50;

/// Files larger than this are not read during content search
pub const MAX_CONTENT_BYTES: u64 = 2 * 1024 * 1024;

/// Marker added where a preview was cut off
pub const ELLIPSIS: &str = "...";

/// Which search to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Match against note names
    Name,
    /// Match against note contents
    Content,
}

/// How closely a note name matches the search, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    None,
    Subsequence,
    Substring,
    Prefix,
    Exact,
}

/// Score of a note name against a search; higher is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchScore {
    pub tier: MatchTier,
    /// Skim score, only meaningful within a tier
    pub fuzzy: i64,
}

impl MatchScore {
    const NONE: MatchScore = MatchScore {
        tier: MatchTier::None,
        fuzzy: 0,
    };
}

/// Case-insensitive fuzzy scorer for note names
pub struct NameMatcher {
    matcher: SkimMatcherV2,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl NameMatcher {
    /// Score `name` against `search`
    ///
    /// An empty search scores every name the same.
    pub fn score(&self, search: &str, name: &str) -> MatchScore {
        let search = search.trim().to_lowercase();
        if search.is_empty() {
            return MatchScore::NONE;
        }
        let lower = name.to_lowercase();
        let fuzzy = self.matcher.fuzzy_match(&lower, &search);

        let tier = if lower == search {
            MatchTier::Exact
        } else if lower.starts_with(&search) {
            MatchTier::Prefix
        } else if lower.contains(&search) {
            MatchTier::Substring
        } else if fuzzy.is_some() {
            MatchTier::Subsequence
        } else {
            return MatchScore::NONE;
        };

        MatchScore {
            tier,
            fuzzy: fuzzy.unwrap_or(0),
        }
    }
}

/// All Markdown files below `root`, in file-name order
///
/// Hidden files and directories (such as `.obsidian` or `.trash`) are
/// skipped. Entries that cannot be read are logged and left out.
pub fn markdown_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Find notes whose names match `search`, best match first
///
/// Ties (including every note for an empty search) are ordered by
/// case-insensitive name. Names that do not match at all are left out,
/// except for an empty search, which returns every note in the vault.
pub fn find_by_name(vault: &Vault, search: &str) -> Vec<Note> {
    debug!("Searching note names in {:?} for {:?}", vault.root, search);
    let matcher = NameMatcher::default();
    let keep_all = search.trim().is_empty();

    let mut scored: Vec<(MatchScore, Note)> = markdown_files(&vault.root)
        .into_iter()
        .filter_map(|path| {
            let note = Note::from_path(path, vault);
            let score = matcher.score(search, &note.name);
            (keep_all || score.tier != MatchTier::None).then_some((score, note))
        })
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b.cmp(score_a).then_with(|| compare_names(a, b))
    });

    scored.into_iter().map(|(_, note)| note).collect()
}

/// Find notes whose contents contain `search`, ignoring case
///
/// Each matching file yields one note whose description is a preview of
/// the first match. Unreadable and oversized files are skipped.
pub fn find_by_content(vault: &Vault, search: &str) -> Vec<Note> {
    if search.is_empty() {
        return Vec::new();
    }
    debug!("Searching note contents in {:?} for {:?}", vault.root, search);

    let mut notes = Vec::new();
    for path in markdown_files(&vault.root) {
        match fs::metadata(&path) {
            Ok(meta) if meta.len() > MAX_CONTENT_BYTES => {
                debug!("Skipping {:?}: {} bytes is over the read limit", path, meta.len());
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Could not read file {:?} for content search: {}", path, e);
                continue;
            }
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read file {:?} for content search: {}", path, e);
                continue;
            }
        };

        if let Some(text) = preview(&content, search) {
            notes.push(Note::with_description(path, text, vault));
        }
    }
    notes
}

/// Context around the first case-insensitive match of `search` in `content`
///
/// Keeps [`CONTEXT_SIZE`] characters on each side of the match (fewer at the
/// file boundaries), trimmed, with [`ELLIPSIS`] marking a cut at either end.
pub fn preview(content: &str, search: &str) -> Option<String> {
    if search.is_empty() {
        return None;
    }

    let chars: Vec<char> = content.chars().collect();
    let folded: Vec<char> = chars.iter().copied().map(fold_case).collect();
    let needle: Vec<char> = search.chars().map(fold_case).collect();

    let index = folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;

    let start = index.saturating_sub(CONTEXT_SIZE);
    let end = (index + needle.len() + CONTEXT_SIZE).min(chars.len());

    let window: String = chars[start..end].iter().collect();
    let mut text = String::new();
    if start > 0 {
        text.push_str(ELLIPSIS);
    }
    text.push_str(window.trim());
    if end < chars.len() {
        text.push_str(ELLIPSIS);
    }
    Some(text)
}

// One char in, one char out, so match offsets line up with the unfolded text.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn compare_names(a: &Note, b: &Note) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Combine per-vault results into one list ordered by case-insensitive name
///
/// The sort is stable, so notes with the same name keep vault order.
pub fn merge_notes(per_vault: impl IntoIterator<Item = Vec<Note>>) -> Vec<Note> {
    let mut notes: Vec<Note> = per_vault.into_iter().flatten().collect();
    notes.sort_by(compare_names);
    notes
}

/// Run a search over every vault, merge, then keep the first `limit` notes
pub fn search_vaults(vaults: &[Vault], search: &str, mode: SearchMode, limit: usize) -> Vec<Note> {
    let per_vault = vaults.iter().map(|vault| match mode {
        SearchMode::Name => find_by_name(vault, search),
        SearchMode::Content => find_by_content(vault, search),
    });

    let mut notes = merge_notes(per_vault);
    notes.truncate(limit);
    notes
}
