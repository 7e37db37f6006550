//! Daily note date formats
//!
//! Vault settings describe the daily note file name with moment.js style
//! tokens (`YYYY-MM-DD`, `dddd, MMMM Do`). [`DateFormat::parse`] translates
//! them once into chrono strftime patterns; anything outside the supported
//! vocabulary is rejected rather than copied through.

use chrono::{Datelike, NaiveDateTime};

use crate::error::DateFormatError;

/// Supported tokens, longest first so that greedy matching picks `MMMM`
/// over `MM`. `None` marks tokens chrono has no pattern for.
const TOKENS: &[(&str, Option<&str>)] = &[
    ("YYYY", Some("%Y")),
    ("GGGG", Some("%G")),
    ("MMMM", Some("%B")),
    ("DDDD", Some("%j")),
    ("dddd", Some("%A")),
    ("MMM", Some("%b")),
    ("DDD", Some("%-j")),
    ("ddd", Some("%a")),
    ("YY", Some("%y")),
    ("GG", Some("%g")),
    ("MM", Some("%m")),
    ("DD", Some("%d")),
    ("Do", None),
    ("dd", None),
    ("WW", Some("%V")),
    ("HH", Some("%H")),
    ("hh", Some("%I")),
    ("mm", Some("%M")),
    ("ss", Some("%S")),
    ("M", Some("%-m")),
    ("D", Some("%-d")),
    ("d", Some("%w")),
    ("e", Some("%w")),
    ("E", Some("%u")),
    ("W", Some("%-V")),
    ("H", Some("%-H")),
    ("h", Some("%-I")),
    ("m", Some("%-M")),
    ("s", Some("%-S")),
    ("A", Some("%p")),
    ("a", Some("%P")),
    ("X", Some("%s")),
    ("Q", None),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// chrono strftime pattern
    Pattern(&'static str),
    Literal(String),
    /// Day of month with English ordinal suffix (`Do`)
    OrdinalDay,
    /// Two-letter weekday (`dd`)
    ShortWeekday,
    /// Quarter of the year (`Q`)
    Quarter,
}

/// A parsed daily note format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    items: Vec<Item>,
}

impl DateFormat {
    /// Translate a moment-style format string
    pub fn parse(format: &str) -> Result<Self, DateFormatError> {
        let mut items = Vec::new();
        let mut rest = format;

        while let Some(c) = rest.chars().next() {
            if c == '[' {
                let end = rest.find(']').ok_or_else(|| DateFormatError::UnterminatedLiteral {
                    format: format.to_string(),
                })?;
                push_literal(&mut items, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut items, &rest[..c.len_utf8()]);
                rest = &rest[c.len_utf8()..];
                continue;
            }

            let &(token, pattern) = TOKENS
                .iter()
                .find(|(token, _)| rest.starts_with(token))
                .ok_or_else(|| DateFormatError::UnknownToken {
                    token: rest.chars().take_while(|&x| x == c).collect(),
                    format: format.to_string(),
                })?;

            items.push(match (token, pattern) {
                (_, Some(pattern)) => Item::Pattern(pattern),
                ("Do", None) => Item::OrdinalDay,
                ("dd", None) => Item::ShortWeekday,
                _ => Item::Quarter,
            });
            rest = &rest[token.len()..];
        }

        Ok(Self { items })
    }

    /// Format a date and time with this pattern
    pub fn render(&self, at: &NaiveDateTime) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Item::Pattern(pattern) => out.push_str(&at.format(pattern).to_string()),
                Item::Literal(text) => out.push_str(text),
                Item::OrdinalDay => {
                    let day = at.day();
                    out.push_str(&format!("{}{}", day, ordinal_suffix(day)));
                }
                Item::ShortWeekday => {
                    let name = at.format("%a").to_string();
                    out.extend(name.chars().take(2));
                }
                Item::Quarter => out.push_str(&(at.month0() / 3 + 1).to_string()),
            }
        }
        out
    }
}

fn push_literal(items: &mut Vec<Item>, text: &str) {
    if let Some(Item::Literal(existing)) = items.last_mut() {
        existing.push_str(text);
    } else {
        items.push(Item::Literal(text.to_string()));
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
