use std::collections::HashMap;

use log::debug;

use crate::error::Result;

use super::extractor::extract_to_memory;
use super::parser::ZipParser;

/// A decompressed archive member.
#[derive(Debug)]
struct Part {
    name: String,
    data: Vec<u8>,
}

/// Decompressed archive contents, addressable by entry name.
///
/// Parts live in a single vector built once per read; the name index points
/// into it. When the central directory lists a name twice, the later entry
/// replaces the earlier one.
#[derive(Debug, Default)]
pub struct ZipArchive {
    parts: Vec<Part>,
    index: HashMap<String, usize>,
}

impl ZipArchive {
    /// Decompressed bytes of the named entry.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.index.get(name).map(|&i| self.parts[i].data.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct entry names.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Entry names in central directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    fn insert(&mut self, name: String, data: Vec<u8>) {
        match self.index.get(&name) {
            Some(&i) => self.parts[i].data = data,
            None => {
                self.index.insert(name.clone(), self.parts.len());
                self.parts.push(Part { name, data });
            }
        }
    }
}

/// Reads a whole ZIP buffer into a [`ZipArchive`].
pub struct ZipReader;

impl ZipReader {
    /// Parse the central directory and decompress every entry.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed header or unsupported compression
    /// method; no partial archive is returned.
    pub fn read(buf: &[u8]) -> Result<ZipArchive> {
        let entries = ZipParser::new(buf).list_entries()?;

        let mut archive = ZipArchive {
            parts: Vec::with_capacity(entries.len()),
            index: HashMap::with_capacity(entries.len()),
        };
        for entry in &entries {
            let data = extract_to_memory(entry)?;
            archive.insert(entry.file_name.clone(), data);
        }

        debug!("read {} zip entries", archive.len());
        Ok(archive)
    }
}
