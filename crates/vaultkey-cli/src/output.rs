//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use vaultkey_core::{DailyPath, ItemAction, Note, ResultItem};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a list of notes
    pub fn print_notes(&self, notes: &[Note]) {
        match self.format {
            OutputFormat::Human => {
                if notes.is_empty() {
                    println!("No notes found.");
                    return;
                }
                for note in notes {
                    let detail = if note.has_preview() {
                        truncate_line(&note.description, 60)
                    } else {
                        note.path.display().to_string()
                    };
                    println!(
                        "{} | {} | {}",
                        truncate(&note.name, 30),
                        truncate(&note.vault_name, 15),
                        detail
                    );
                }
                println!("\n{} note(s)", notes.len());
            }
            OutputFormat::Json => print_json(&notes),
            OutputFormat::Quiet => {
                for note in notes {
                    println!("{}", note.path.display());
                }
            }
        }
    }

    /// Print a numbered list of launcher items
    pub fn print_items(&self, items: &[ResultItem]) {
        match self.format {
            OutputFormat::Human => {
                for (index, item) in items.iter().enumerate() {
                    let marker = match item.on_enter {
                        Some(ItemAction::Open(_)) => "→",
                        Some(ItemAction::Custom(_)) => "+",
                        None => " ",
                    };
                    println!("{:>2}. {} {}", index + 1, marker, item.title);
                    if !item.description.is_empty() {
                        println!("       {}", truncate_line(&item.description, 72));
                    }
                }
            }
            OutputFormat::Json => print_json(&items),
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.title);
                }
            }
        }
    }

    /// Print a daily note location
    pub fn print_daily(&self, daily: &DailyPath, url: &str) {
        match self.format {
            OutputFormat::Human => {
                println!("Date:   {}", daily.date);
                println!("Path:   {}", daily.path.display());
                println!("Exists: {}", if daily.exists { "yes" } else { "no" });
                println!("URL:    {}", url);
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "date": daily.date,
                "path": daily.path,
                "folder": daily.folder,
                "exists": daily.exists,
                "url": url
            })),
            OutputFormat::Quiet => println!("{}", url),
        }
    }

    /// Print a URL that is about to be (or could be) opened
    pub fn print_url(&self, url: &str) {
        match self.format {
            OutputFormat::Human | OutputFormat::Quiet => println!("{}", url),
            OutputFormat::Json => print_json(&serde_json::json!({ "url": url })),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
pub fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    truncate(first_line.trim(), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("ääääääääääää", 5), "ää...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
        assert_eq!(truncate_line("\n  indented\nnext", 20), "indented");
        assert_eq!(
            truncate_line("very long single line here", 10),
            "very lo..."
        );
    }
}
