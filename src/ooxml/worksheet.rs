//! Worksheet cell grid (`sheetN.xml`).

use log::warn;

use crate::records::{Cell, CellKind, Row};
use crate::xml::{TagKind, TagScanner, decode_entities};

use super::shared_strings::{SharedStringTable, read_string_item};

/// Converts a column label into its 0-based index (`A` = 0, `AA` = 26).
///
/// Returns `None` for an empty label, anything but `A`-`Z`, or a label too
/// long to fit in `usize`.
pub fn column_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut col: usize = 0;
    for c in label.bytes() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)?.checked_add((c - b'A') as usize + 1)?;
    }
    Some(col - 1)
}

/// Column of a cell reference such as `AB12`, from its letters only.
fn reference_column(reference: &str) -> Option<usize> {
    let letters = reference
        .bytes()
        .take_while(|b| b.is_ascii_uppercase())
        .count();
    column_index(&reference[..letters])
}

/// Parse all `<row>` elements in document order.
///
/// Cells without a value are left out of their row; a row with no cells
/// still takes its place in the sequence.
pub fn parse_rows(xml: &str, shared: &SharedStringTable) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut scanner = TagScanner::new(xml);

    while let Some(tag) = scanner.next() {
        match tag.kind {
            TagKind::Start if tag.name == "row" => rows.push(read_row(&mut scanner, shared)),
            TagKind::Empty if tag.name == "row" => rows.push(Row::new()),
            _ => {}
        }
    }

    rows
}

fn read_row(scanner: &mut TagScanner<'_>, shared: &SharedStringTable) -> Row {
    let mut cells = Vec::new();
    let mut next_column = 0;

    while let Some(tag) = scanner.next() {
        if tag.is_end("row") {
            break;
        }
        if !tag.opens("c") {
            continue;
        }

        // Without a usable reference, the cell follows the previous one
        let column = match tag.attr("r") {
            Some(reference) => reference_column(reference).unwrap_or_else(|| {
                warn!("cell reference {:?} has no column letters", reference);
                next_column
            }),
            None => next_column,
        };
        next_column = column + 1;

        if tag.kind == TagKind::Empty {
            continue;
        }
        if let Some((value, kind)) = read_cell_value(scanner, tag.attr("t"), shared) {
            cells.push(Cell::new(column, value, kind));
        }
    }

    Row::from_cells(cells)
}

/// Read a cell body up to `</c>`.
///
/// `<v>` takes precedence over inline text. With `t="s"` the value is an
/// index into the shared strings; an index that does not resolve reads as
/// an empty string.
fn read_cell_value(
    scanner: &mut TagScanner<'_>,
    cell_type: Option<&str>,
    shared: &SharedStringTable,
) -> Option<(String, CellKind)> {
    let mut value: Option<&str> = None;
    let mut inline: Option<String> = None;

    while let Some(tag) = scanner.next() {
        match (tag.kind, tag.name) {
            (TagKind::End, "c") => break,
            (TagKind::Start, "v") => {
                let raw = scanner.read_text("v");
                if value.is_none() {
                    value = Some(raw);
                }
            }
            (TagKind::Empty, "v") if value.is_none() => value = Some(""),
            (TagKind::Start, "is") => {
                let text = read_string_item(scanner, "is");
                if inline.is_none() {
                    inline = Some(text);
                }
            }
            (TagKind::Start, "t") => {
                let text = decode_entities(scanner.read_text("t")).into_owned();
                if inline.is_none() {
                    inline = Some(text);
                }
            }
            (TagKind::Start, "f") => {
                scanner.read_text("f");
            }
            _ => {}
        }
    }

    match (value, cell_type) {
        (Some(raw), Some("s")) => {
            let resolved = raw.trim().parse::<usize>().ok().and_then(|i| shared.get(i));
            let text = resolved.unwrap_or_else(|| {
                warn!("shared string index {:?} out of range", raw);
                ""
            });
            Some((text.to_string(), CellKind::SharedString))
        }
        (Some(raw), None | Some("n")) => {
            Some((decode_entities(raw).into_owned(), CellKind::Number))
        }
        (Some(raw), Some(_)) => Some((decode_entities(raw).into_owned(), CellKind::Text)),
        (None, _) => inline.map(|text| (text, CellKind::Text)),
    }
}
