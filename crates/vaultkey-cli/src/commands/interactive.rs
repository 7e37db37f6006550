//! Interactive launcher
//!
//! A line-oriented stand-in for a launcher host. Each line is either a
//! keyword query (`on meeting notes`) or the number of an item from the last
//! list. The capture session lives as long as the loop does.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::info;

use vaultkey_core::{Config, ItemAction, Launcher, Response, ResultItem};

use super::open_url;
use crate::output::Output;

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Empty,
    /// Zero-based index into the last rendered list
    Select(usize),
    Query { keyword: &'a str, search: &'a str },
}

fn parse_line(line: &str, item_count: usize) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => return Input::Empty,
        ":q" | ":quit" => return Input::Quit,
        _ => {}
    }

    if let Ok(n) = line.parse::<usize>() {
        if (1..=item_count).contains(&n) {
            return Input::Select(n - 1);
        }
    }

    match line.split_once(char::is_whitespace) {
        Some((keyword, search)) => Input::Query {
            keyword,
            search: search.trim_start(),
        },
        None => Input::Query {
            keyword: line,
            search: "",
        },
    }
}

/// Run the launcher loop until `:q` or end of input
pub fn run(config: Config, print_only: bool, output: &Output) -> Result<()> {
    let keywords = config.keywords.clone();
    let mut launcher = Launcher::new(config);
    let mut items: Vec<ResultItem> = Vec::new();

    output.message(&format!(
        "Keywords: {} (search), {} (search content), {} (daily note), {} (capture)",
        keywords.search, keywords.search_content, keywords.daily, keywords.capture
    ));
    output.message("Type a keyword and text, the number of an item, or :q to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let response = match parse_line(&line, items.len()) {
            Input::Quit => break,
            Input::Empty => continue,
            Input::Query { keyword, search } => launcher.query(keyword, search),
            Input::Select(index) => match items[index].on_enter.clone() {
                None => {
                    output.message("Nothing to do for this item.");
                    continue;
                }
                Some(ItemAction::Open(url)) => Response::Open(url),
                Some(ItemAction::Custom(action)) => match launcher.enter(action) {
                    Ok(response) => response,
                    Err(e) => {
                        eprintln!("✗ {}", e);
                        items.clear();
                        continue;
                    }
                },
            },
        };

        items = handle_response(response, print_only, output);
    }

    info!("Interactive session ended");
    launcher.shutdown();
    Ok(())
}

/// Act on a launcher response, returning the items now on screen
fn handle_response(response: Response, print_only: bool, output: &Output) -> Vec<ResultItem> {
    match response {
        Response::Render(items) => {
            output.print_items(&items);
            items
        }
        Response::Open(url) => {
            if let Err(e) = open_url(&url, print_only, output) {
                eprintln!("✗ {}", e);
            }
            Vec::new()
        }
        Response::SetQuery(query) => {
            if query.is_empty() {
                output.message("Cancelled.");
            } else {
                output.message(&format!("Pick a note: {}<name>", query));
            }
            Vec::new()
        }
        Response::Hide => {
            output.success("Done");
            Vec::new()
        }
        Response::Nothing => {
            output.message("Unknown keyword.");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_and_empty() {
        assert_eq!(parse_line(":q", 0), Input::Quit);
        assert_eq!(parse_line("  :quit ", 3), Input::Quit);
        assert_eq!(parse_line("   ", 3), Input::Empty);
    }

    #[test]
    fn test_parse_selection_in_range() {
        assert_eq!(parse_line("1", 3), Input::Select(0));
        assert_eq!(parse_line(" 3 ", 3), Input::Select(2));
    }

    #[test]
    fn test_parse_number_out_of_range_is_query() {
        assert_eq!(
            parse_line("4", 3),
            Input::Query {
                keyword: "4",
                search: ""
            }
        );
        assert_eq!(
            parse_line("0", 3),
            Input::Query {
                keyword: "0",
                search: ""
            }
        );
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(
            parse_line("on  meeting notes", 0),
            Input::Query {
                keyword: "on",
                search: "meeting notes"
            }
        );
        assert_eq!(
            parse_line("od", 0),
            Input::Query {
                keyword: "od",
                search: ""
            }
        );
    }
}
