//! Entry point: bytes plus file name in, records out.

use log::debug;

use crate::delimited;
use crate::error::{Error, Result};
use crate::ooxml;
use crate::records::{Record, RecordBuilder, Row};
use crate::zip::ZipReader;

/// Input format, chosen from the file name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// `.csv` or `.txt`
    Delimited,
    /// `.xlsx` or `.xlsm`
    OpenXml,
}

impl SheetFormat {
    /// Select the format by case-insensitive extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFileType`] for any other extension.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".csv") || lower.ends_with(".txt") {
            Ok(SheetFormat::Delimited)
        } else if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
            Ok(SheetFormat::OpenXml)
        } else {
            Err(Error::UnsupportedFileType(file_name.to_string()))
        }
    }
}

/// Parse an uploaded spreadsheet into rows of cell values.
pub fn parse_rows(buf: &[u8], file_name: &str) -> Result<Vec<Row>> {
    match SheetFormat::from_file_name(file_name)? {
        SheetFormat::Delimited => Ok(delimited::parse(buf)),
        SheetFormat::OpenXml => {
            let archive = ZipReader::read(buf)?;
            ooxml::extract(&archive)
        }
    }
}

/// Parse an uploaded spreadsheet into header-keyed records.
///
/// The first row supplies the header labels; blank rows are dropped. An
/// empty result means the file had no data rows, which callers report as
/// [`Error::EmptyInput`].
///
/// # Example
///
/// ```
/// let records = sheetload::parse_spreadsheet(b"Nombre,Monto\nAna,10.5\n", "clientes.csv")?;
/// assert_eq!(records[0]["Monto"], "10.5");
/// # Ok::<(), sheetload::Error>(())
/// ```
pub fn parse_spreadsheet(buf: &[u8], file_name: &str) -> Result<Vec<Record>> {
    let rows = parse_rows(buf, file_name)?;
    let records = RecordBuilder::build(&rows);
    debug!("{}: {} records", file_name, records.len());
    Ok(records)
}
