//! Delimited text (CSV/TSV-like) parsing.
//!
//! The delimiter is sniffed from the first non-blank line among comma,
//! semicolon and tab. Fields follow the usual double-quote rules: a quote
//! toggles quoting, `""` inside quotes is a literal quote, and delimiters
//! only split outside quotes. Quoted fields cannot span lines.

use log::debug;

use crate::records::Row;
use crate::xml::strip_bom;

/// Pick the delimiter for a line.
///
/// Semicolon wins if it outnumbers commas and is at least as frequent as
/// tabs; otherwise tab wins if it outnumbers commas; comma is the default.
pub fn detect_delimiter(line: &str) -> char {
    let count = |d: char| line.chars().filter(|&c| c == d).count();
    let (comma, semicolon, tab) = (count(','), count(';'), count('\t'));

    if semicolon > comma && semicolon >= tab {
        ';'
    } else if tab > comma {
        '\t'
    } else {
        ','
    }
}

/// Split one line into trimmed fields.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if inside_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                inside_quotes = !inside_quotes;
            }
        } else if c == delimiter && !inside_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parse a text buffer into rows.
///
/// Invalid UTF-8 is replaced rather than rejected. Lines are split on `\n`
/// with an optional preceding `\r`; blank lines are dropped.
pub fn parse(buf: &[u8]) -> Vec<Row> {
    let text = String::from_utf8_lossy(buf);
    let lines: Vec<&str> = strip_bom(&text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let delimiter = detect_delimiter(first);
    debug!("delimiter {:?}, {} lines", delimiter, lines.len());

    lines
        .iter()
        .map(|line| Row::from_values(split_line(line, delimiter)))
        .collect()
}
