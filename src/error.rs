//! Error types for spreadsheet ingestion.

use thiserror::Error;

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds of a parse call.
///
/// Every variant is terminal: the first failure aborts the whole parse and
/// no partial records are returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// End of central directory not found, a header signature mismatch, a
    /// structure that runs past the end of the buffer or a corrupt payload.
    #[error("Malformed ZIP archive: {0}")]
    MalformedArchive(&'static str),

    /// An entry uses a compression method other than stored (0) or deflate (8).
    #[error("Unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    /// A required workbook part is absent or does not declare what it should.
    #[error("Missing workbook part: {0}")]
    MissingWorkbookPart(String),

    /// The file name does not end in a recognized extension.
    #[error("Unsupported file type: {0} (expected .xlsx, .xlsm, .csv or .txt)")]
    UnsupportedFileType(String),

    /// No data rows remain once the header and blank rows are removed.
    #[error("No rows found")]
    EmptyInput,
}

/// Header fields are read through `byteorder` cursors over in-memory slices,
/// so the only I/O failure possible is running out of bytes.
impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Error::MalformedArchive("unexpected end of data")
    }
}
