//! Shared string table (`sharedStrings.xml`).

use crate::xml::{TagKind, TagScanner, decode_entities};

/// Strings in order of appearance; cells refer to them by 0-based index.
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    strings: Vec<String>,
}

impl SharedStringTable {
    /// Parse every `<si>` item of the part.
    pub fn parse(xml: &str) -> Self {
        let mut strings = Vec::new();
        let mut scanner = TagScanner::new(xml);

        while let Some(tag) = scanner.next() {
            match tag.kind {
                TagKind::Start if tag.name == "si" => {
                    strings.push(read_string_item(&mut scanner, "si"));
                }
                TagKind::Empty if tag.name == "si" => strings.push(String::new()),
                _ => {}
            }
        }

        Self { strings }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Read a string item body up to `</end>`, the start tag already consumed.
///
/// Rich text runs (`<r>`) are concatenated in order; without runs the first
/// plain `<t>` is used. Phonetic hints (`<rPh>`) are ignored.
pub(crate) fn read_string_item(scanner: &mut TagScanner<'_>, end: &str) -> String {
    let mut runs = String::new();
    let mut has_runs = false;
    let mut plain: Option<String> = None;
    let mut in_run = false;

    while let Some(tag) = scanner.next() {
        match (tag.kind, tag.name) {
            (TagKind::End, name) if name == end => break,
            (TagKind::Start, "r") => in_run = true,
            (TagKind::End, "r") => in_run = false,
            (TagKind::Start, "rPh") => {
                scanner.read_text("rPh");
            }
            (TagKind::Start, "t") => {
                let text = decode_entities(scanner.read_text("t"));
                if in_run {
                    runs.push_str(&text);
                    has_runs = true;
                } else if plain.is_none() {
                    plain = Some(text.into_owned());
                }
            }
            (TagKind::Empty, "t") => {
                if in_run {
                    has_runs = true;
                } else if plain.is_none() {
                    plain = Some(String::new());
                }
            }
            _ => {}
        }
    }

    if has_runs {
        runs
    } else {
        plain.unwrap_or_default()
    }
}
