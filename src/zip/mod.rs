//! ZIP archive parsing and extraction.
//!
//! This module reads just enough of the ZIP container format to pull the
//! named parts out of an OOXML package held in memory.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: Payload decompression
//! - [`archive`]: The name-indexed [`ZipArchive`] handed to callers
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! ## Supported Features
//!
//! - STORED (no compression) method
//! - DEFLATE compression method
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No ZIP64 extensions
//! - No BZIP2, LZMA, or other compression methods

mod archive;
mod extractor;
mod parser;
mod structures;

pub use archive::{ZipArchive, ZipReader};
pub use extractor::extract_to_memory;
pub use parser::ZipParser;
pub use structures::*;
