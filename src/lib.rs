//! # sheetload
//!
//! Turns an uploaded spreadsheet (raw bytes plus file name) into an ordered
//! list of records, each mapping a header label to a string value.
//!
//! The library carries its own minimal ZIP reader and XML tag scanner, so
//! an Office Open XML workbook is read without any archive or XML crate.
//! Delimited text is parsed with delimiter sniffing and double-quote rules.
//!
//! ## Features
//!
//! - `.xlsx` / `.xlsm`: first worksheet, shared and inline strings
//! - `.csv` / `.txt`: comma, semicolon or tab separated, sniffed per file
//! - STORED and DEFLATE ZIP entries
//! - Synchronous, allocation-bounded parsing with no shared state; calls
//!   from several threads need no coordination
//! - JSON import request/response model for upload endpoints
//!
//! ## Example
//!
//! ```
//! use sheetload::parse_spreadsheet;
//!
//! let records = parse_spreadsheet(b"Nombre;Monto\nAna;10,5\n", "clientes.csv")?;
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0]["Nombre"], "Ana");
//! assert_eq!(records[0]["Monto"], "10,5");
//! # Ok::<(), sheetload::Error>(())
//! ```

pub mod cli;
pub mod delimited;
pub mod error;
pub mod io;
pub mod ooxml;
pub mod records;
pub mod spreadsheet;
pub mod upload;
pub mod xml;
pub mod zip;

pub use cli::{Cli, OutputFormat};
pub use error::{Error, Result};
pub use io::{HttpSource, LocalFileSource, Source, StdinSource};
pub use records::{Cell, CellKind, Record, RecordBuilder, Row};
pub use spreadsheet::{SheetFormat, parse_rows, parse_spreadsheet};
pub use upload::{ImportError, ImportRequest, ImportResponse};
pub use zip::{ZipArchive, ZipReader};
