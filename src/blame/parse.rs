//! Reading authorship out of `git blame` output.
//!
//! One line of input has the shape
//!
//! ```text
//! line    := ["^"] rev WS+ "(" author WS+ date header ")" WS+ content
//! rev     := [0-9A-Za-z_]+ (abbreviated commit id)
//! author  := shortest run of characters followed by WS+ date
//! date    := [0-9]{4} "-" [0-9]{2} "-" [0-9]{2}
//! header  := shortest run of characters up to the next ")"
//! content := rest of the line, may be empty
//! WS      := one of "\t" "\n" "\f" "\r" " "
//! ```
//!
//! The character classes are ASCII only. Content made of other whitespace,
//! such as a lone U+00A0, is not blank and counts.
//!
//! A leading `^` marks a line from a boundary commit and does not change
//! who the author is. Anything that does not fit the shape is ignored.

use crate::config::DateRange;
use crate::model::AuthorTally;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn blame_line_regex() -> &'static Regex {
    static BLAME_LINE: OnceLock<Regex> = OnceLock::new();
    BLAME_LINE.get_or_init(|| {
        Regex::new(concat!(
            r"^\^?[0-9A-Za-z_]+[\t\n\f\r ]+",
            r"\((.*?)[\t\n\f\r ]+([0-9]{4}-[0-9]{2}-[0-9]{2}).*?\)",
            r"[\t\n\f\r ]+(.*)$",
        ))
        .expect("blame line pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlameLine<'a> {
    pub author: &'a str,
    /// `None` when the date column matched the pattern but is not a real date.
    pub date: Option<NaiveDate>,
    pub content: &'a str,
}

impl BlameLine<'_> {
    /// Blank source lines do not count as code.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

pub fn parse_line(line: &str) -> Option<BlameLine<'_>> {
    let caps = blame_line_regex().captures(line)?;
    let author = caps.get(1)?.as_str();
    let date = caps
        .get(2)
        .and_then(|d| NaiveDate::parse_from_str(d.as_str(), "%Y-%m-%d").ok());
    let content = caps.get(3)?.as_str();
    Some(BlameLine {
        author,
        date,
        content,
    })
}

/// Every line of `output` that has the blame shape, blank or not.
pub fn parse(output: &str) -> impl Iterator<Item = BlameLine<'_>> {
    output.lines().filter_map(parse_line)
}

/// One line of credit per non-blank blame line whose date falls in `range`.
pub fn count_lines(output: &str, range: &DateRange) -> AuthorTally {
    let mut tally = AuthorTally::new();
    for line in parse(output) {
        if line.has_content() && range.contains(line.date) {
            tally.add(line.author, 1);
        }
    }
    tally
}
