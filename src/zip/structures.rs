use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{Error, Result};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }
}

/// End of Central Directory (EOCD) - 22 bytes minimum
#[derive(Debug)]
pub struct EndOfCentralDirectory {
    pub total_entries: u16,
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    /// 0x06054b50, little endian
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(Error::MalformedArchive("invalid end of central directory"));
        }

        let mut cursor = Cursor::new(&data[4..]);
        let _disk_number = cursor.read_u16::<LittleEndian>()?;
        let _disk_with_cd = cursor.read_u16::<LittleEndian>()?;
        let _disk_entries = cursor.read_u16::<LittleEndian>()?;
        let total_entries = cursor.read_u16::<LittleEndian>()?;
        let _cd_size = cursor.read_u32::<LittleEndian>()?;
        let cd_offset = cursor.read_u32::<LittleEndian>()?;

        Ok(Self {
            total_entries,
            cd_offset,
        })
    }
}

/// Central Directory File Header (CDFH) - 46 bytes plus variable fields
pub struct CentralDirectoryHeader {
    pub compression_method: u16,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    pub file_comment_length: u16,
    pub lfh_offset: u32,
}

impl CentralDirectoryHeader {
    /// 0x02014b50, little endian
    pub const SIGNATURE: &'static [u8] = b"PK\x01\x02";
    pub const SIZE: usize = 46;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(Error::MalformedArchive("invalid central directory file header"));
        }

        let mut cursor = Cursor::new(&data[4..]);
        let _version_made_by = cursor.read_u16::<LittleEndian>()?;
        let _version_needed = cursor.read_u16::<LittleEndian>()?;
        let _flags = cursor.read_u16::<LittleEndian>()?;
        let compression_method = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
        let _crc32 = cursor.read_u32::<LittleEndian>()?;
        let compressed_size = cursor.read_u32::<LittleEndian>()?;
        let uncompressed_size = cursor.read_u32::<LittleEndian>()?;
        let file_name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_field_length = cursor.read_u16::<LittleEndian>()?;
        let file_comment_length = cursor.read_u16::<LittleEndian>()?;
        let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
        let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
        let _external_attrs = cursor.read_u32::<LittleEndian>()?;
        let lfh_offset = cursor.read_u32::<LittleEndian>()?;

        Ok(Self {
            compression_method,
            compressed_size,
            uncompressed_size,
            file_name_length,
            extra_field_length,
            file_comment_length,
            lfh_offset,
        })
    }

    /// Total bytes this header occupies in the central directory.
    pub fn record_len(&self) -> usize {
        Self::SIZE
            + self.file_name_length as usize
            + self.extra_field_length as usize
            + self.file_comment_length as usize
    }
}

/// Local File Header (LFH) - 30 bytes plus variable fields
pub struct LocalFileHeader {
    pub file_name_length: u16,
    pub extra_field_length: u16,
}

impl LocalFileHeader {
    /// 0x04034b50, little endian
    pub const SIGNATURE: &'static [u8] = b"PK\x03\x04";
    pub const SIZE: usize = 30;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return Err(Error::MalformedArchive("invalid local file header"));
        }

        // Offset to filename length field
        let mut cursor = Cursor::new(&data[26..]);

        Ok(Self {
            file_name_length: cursor.read_u16::<LittleEndian>()?,
            extra_field_length: cursor.read_u16::<LittleEndian>()?,
        })
    }

    /// Offset of the entry payload, given the offset of this header.
    pub fn data_offset(&self, lfh_offset: usize) -> usize {
        lfh_offset + Self::SIZE + self.file_name_length as usize + self.extra_field_length as usize
    }
}

/// A central directory entry with its (still compressed) payload.
#[derive(Debug, Clone)]
pub struct ZipEntry<'a> {
    pub file_name: String,
    pub compression_method: CompressionMethod,
    pub uncompressed_size: u64,
    pub payload: &'a [u8],
}
