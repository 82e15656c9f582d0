use flate2::read::DeflateDecoder;
use std::io::Read;

use crate::error::{Error, Result};

use super::structures::{CompressionMethod, ZipEntry};

/// Upper bound on the capacity reserved from the declared size, so a lying
/// header cannot force a huge up-front allocation.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// Extract entry data to memory.
///
/// Stored payloads are copied unchanged; deflate payloads are run through a
/// raw (headerless) deflate decoder.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCompression`] for any other method and
/// [`Error::MalformedArchive`] if the deflate stream is corrupt.
pub fn extract_to_memory(entry: &ZipEntry<'_>) -> Result<Vec<u8>> {
    match entry.compression_method {
        CompressionMethod::Stored => Ok(entry.payload.to_vec()),
        CompressionMethod::Deflate => {
            let mut buf = Vec::with_capacity(entry.uncompressed_size.min(MAX_PREALLOC) as usize);
            DeflateDecoder::new(entry.payload)
                .read_to_end(&mut buf)
                .map_err(|_| Error::MalformedArchive("corrupt deflate stream"))?;
            Ok(buf)
        }
        CompressionMethod::Unknown(method) => Err(Error::UnsupportedCompression(method)),
    }
}
