//! Low-level ZIP archive parser.
//!
//! This module handles the binary parsing of ZIP file structures from an
//! in-memory upload buffer.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) by scanning backwards
//! 2. Read the Central Directory to get metadata for all files
//! 3. Resolve each file's Local File Header to locate its payload

use log::{debug, trace};

use crate::error::{Error, Result};

use super::structures::*;

/// Low-level ZIP file parser over a borrowed buffer.
///
/// Entries returned by [`ZipParser::list_entries`] borrow their payload
/// slices from the buffer; nothing is copied until decompression.
///
/// ## Example
///
/// ```ignore
/// let parser = ZipParser::new(&bytes);
/// for entry in parser.list_entries()? {
///     println!("{} ({} bytes)", entry.file_name, entry.payload.len());
/// }
/// ```
pub struct ZipParser<'a> {
    /// The whole archive
    buf: &'a [u8],
}

impl<'a> ZipParser<'a> {
    /// Create a new parser for the given buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Scans the whole buffer backwards from the last position where a
    /// 22-byte record still fits, and takes the first signature match.
    /// A trailing archive comment is therefore skipped over whatever its
    /// length.
    ///
    /// # Returns
    ///
    /// A tuple of (EOCD record, offset of EOCD in the buffer).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedArchive`] if no signature is found.
    pub fn find_eocd(&self) -> Result<(EndOfCentralDirectory, usize)> {
        let size = EndOfCentralDirectory::SIZE;
        if self.buf.len() < size {
            return Err(Error::MalformedArchive("end of central directory not found"));
        }

        for i in (0..=self.buf.len() - size).rev() {
            if &self.buf[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                let eocd = EndOfCentralDirectory::from_bytes(&self.buf[i..i + size])?;
                return Ok((eocd, i));
            }
        }

        Err(Error::MalformedArchive("end of central directory not found"))
    }

    /// List all entries in the ZIP archive.
    ///
    /// Reads exactly as many Central Directory headers as the EOCD
    /// declares; if any of them cannot be read the whole listing fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedArchive`] on a signature mismatch or when a
    /// header, name or payload runs past the end of the buffer.
    pub fn list_entries(&self) -> Result<Vec<ZipEntry<'a>>> {
        let (eocd, eocd_offset) = self.find_eocd()?;
        debug!(
            "eocd at {}: {} entries, central directory at {}",
            eocd_offset, eocd.total_entries, eocd.cd_offset
        );

        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        let mut ptr = eocd.cd_offset as usize;

        for _ in 0..eocd.total_entries {
            let (entry, record_len) = self.parse_cdfh(ptr)?;
            trace!("entry {} ({:?})", entry.file_name, entry.compression_method);
            entries.push(entry);
            ptr += record_len;
        }

        Ok(entries)
    }

    /// Parse a Central Directory File Header at `ptr` and resolve its payload.
    ///
    /// # Returns
    ///
    /// The entry and the number of bytes its header occupies.
    fn parse_cdfh(&self, ptr: usize) -> Result<(ZipEntry<'a>, usize)> {
        let header = self
            .buf
            .get(ptr..)
            .ok_or(Error::MalformedArchive("central directory offset out of range"))?;
        let cdfh = CentralDirectoryHeader::from_bytes(header)?;

        let name_start = ptr + CentralDirectoryHeader::SIZE;
        let name_end = name_start + cdfh.file_name_length as usize;
        let file_name_bytes = self
            .buf
            .get(name_start..name_end)
            .ok_or(Error::MalformedArchive("file name runs past end of archive"))?;
        // Use lossy conversion to handle non-UTF8 filenames gracefully
        let file_name = String::from_utf8_lossy(file_name_bytes).to_string();

        let payload = self.payload(&cdfh)?;

        let entry = ZipEntry {
            file_name,
            compression_method: CompressionMethod::from_u16(cdfh.compression_method),
            uncompressed_size: cdfh.uncompressed_size as u64,
            payload,
        };

        Ok((entry, cdfh.record_len()))
    }

    /// Slice out the compressed payload of an entry.
    ///
    /// The Local File Header's variable-length fields may differ from the
    /// Central Directory's, so the data offset is computed from the local
    /// header itself.
    fn payload(&self, cdfh: &CentralDirectoryHeader) -> Result<&'a [u8]> {
        let lfh_offset = cdfh.lfh_offset as usize;
        let header = self
            .buf
            .get(lfh_offset..)
            .ok_or(Error::MalformedArchive("local header offset out of range"))?;
        let lfh = LocalFileHeader::from_bytes(header)?;

        let data_start = lfh.data_offset(lfh_offset);
        let data_end = data_start + cdfh.compressed_size as usize;
        self.buf
            .get(data_start..data_end)
            .ok_or(Error::MalformedArchive("entry data runs past end of archive"))
    }
}
