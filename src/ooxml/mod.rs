//! Office Open XML spreadsheet extraction.
//!
//! Only the first sheet declared in the workbook is read. The part chain is:
//!
//! 1. `_rels/.rels` names the workbook part (default `xl/workbook.xml`)
//! 2. the workbook's first `<sheet>` gives a relationship id
//! 3. the workbook relationships (`xl/_rels/workbook.xml.rels`) map that id
//!    to the worksheet part, and optionally point at the shared strings
//! 4. the worksheet's `<row>`/`<c>` elements become [`Row`]s

mod shared_strings;
mod worksheet;

pub use shared_strings::SharedStringTable;
pub use worksheet::{column_index, parse_rows};

use std::borrow::Cow;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::records::Row;
use crate::xml::{TagScanner, decode_entities};
use crate::zip::ZipArchive;

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_WORKBOOK: &str = "xl/workbook.xml";
const OFFICE_DOCUMENT_TYPE: &str = "/officeDocument";
const SHARED_STRINGS_TYPE: &str = "/sharedStrings";

/// A `<Relationship>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub kind: String,
    pub target: String,
}

/// Parse all relationships of a `.rels` part.
pub fn parse_relationships(xml: &str) -> Vec<Relationship> {
    TagScanner::new(xml)
        .filter(|tag| tag.opens("Relationship"))
        .filter_map(|tag| {
            Some(Relationship {
                id: decode_entities(tag.attr("Id")?).into_owned(),
                kind: decode_entities(tag.attr("Type").unwrap_or_default()).into_owned(),
                target: decode_entities(tag.attr("Target")?).into_owned(),
            })
        })
        .collect()
}

/// A `<sheet>` declaration from the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDeclaration {
    pub name: String,
    pub relationship_id: String,
}

/// First `<sheet>` carrying both a `name` and a prefixed `id` (`r:id`).
pub fn first_sheet(workbook_xml: &str) -> Option<SheetDeclaration> {
    TagScanner::new(workbook_xml)
        .filter(|tag| tag.opens("sheet"))
        .find_map(|tag| {
            let name = tag.attr("name")?;
            let (_, relationship_id) = tag
                .attributes()
                .find(|(key, _)| matches!(key.split_once(':'), Some((_, "id"))))?;
            Some(SheetDeclaration {
                name: decode_entities(name).into_owned(),
                relationship_id: decode_entities(relationship_id).into_owned(),
            })
        })
}

/// Resolve a relationship target against the directory of its source part.
///
/// `base` is a directory prefix such as `xl/` (or empty for the package
/// root). Targets with a leading `/` are package-absolute. `.` and `..`
/// segments are normalised.
pub fn resolve_target(base: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("{base}{target}"),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Split a part path into its directory prefix (with trailing `/`) and file name.
fn split_part_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => (&path[..=i], &path[i + 1..]),
        None => ("", path),
    }
}

fn part_text<'a>(archive: &'a ZipArchive, name: &str) -> Option<Cow<'a, str>> {
    archive.get(name).map(String::from_utf8_lossy)
}

/// Path of the workbook part, from the package relationships when present.
fn workbook_path(archive: &ZipArchive) -> String {
    let Some(rels) = part_text(archive, PACKAGE_RELS) else {
        return DEFAULT_WORKBOOK.to_string();
    };
    match parse_relationships(&rels)
        .into_iter()
        .find(|rel| rel.kind.ends_with(OFFICE_DOCUMENT_TYPE))
    {
        Some(rel) => resolve_target("", &rel.target),
        None => {
            warn!("{} declares no office document, using {}", PACKAGE_RELS, DEFAULT_WORKBOOK);
            DEFAULT_WORKBOOK.to_string()
        }
    }
}

/// Extract the rows of the first worksheet.
///
/// # Errors
///
/// Returns [`Error::MissingWorkbookPart`] if the workbook, its
/// relationships, the sheet declaration or the worksheet part is missing.
/// A missing shared strings part is not an error.
pub fn extract(archive: &ZipArchive) -> Result<Vec<Row>> {
    let workbook = workbook_path(archive);
    let workbook_xml =
        part_text(archive, &workbook).ok_or_else(|| Error::MissingWorkbookPart(workbook.clone()))?;

    let sheet = first_sheet(&workbook_xml)
        .ok_or_else(|| Error::MissingWorkbookPart(format!("sheet declaration in {workbook}")))?;

    let (base, file_name) = split_part_path(&workbook);
    let rels_path = format!("{base}_rels/{file_name}.rels");
    let rels_xml =
        part_text(archive, &rels_path).ok_or_else(|| Error::MissingWorkbookPart(rels_path.clone()))?;
    let relationships = parse_relationships(&rels_xml);

    let sheet_rel = relationships
        .iter()
        .find(|rel| rel.id == sheet.relationship_id)
        .ok_or_else(|| {
            Error::MissingWorkbookPart(format!(
                "relationship {} for sheet {:?}",
                sheet.relationship_id, sheet.name
            ))
        })?;
    let sheet_path = resolve_target(base, &sheet_rel.target);
    debug!("sheet {:?} at {}", sheet.name, sheet_path);

    let sheet_xml =
        part_text(archive, &sheet_path).ok_or_else(|| Error::MissingWorkbookPart(sheet_path.clone()))?;

    let shared_path = relationships
        .iter()
        .find(|rel| rel.kind.ends_with(SHARED_STRINGS_TYPE))
        .map(|rel| resolve_target(base, &rel.target))
        .unwrap_or_else(|| format!("{base}sharedStrings.xml"));
    let shared = part_text(archive, &shared_path)
        .map(|xml| SharedStringTable::parse(&xml))
        .unwrap_or_default();
    debug!("{} shared strings", shared.len());

    let rows = parse_rows(&sheet_xml, &shared);
    debug!("{} rows in {}", rows.len(), sheet_path);
    Ok(rows)
}
