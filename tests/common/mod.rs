//! Fixture builders: hand-assembled ZIP archives and minimal XLSX packages.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

pub const STORED: u16 = 0;
pub const DEFLATE: u16 = 8;

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Writes local headers and payloads as entries are added, then the
/// central directory and end record on `finish`.
#[derive(Default)]
pub struct ZipBuilder {
    body: Vec<u8>,
    central: Vec<u8>,
    count: u16,
    comment: Vec<u8>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(self, name: &str, data: &[u8]) -> Self {
        self.entry(name, STORED, data, data, &[])
    }

    pub fn deflated(self, name: &str, data: &[u8]) -> Self {
        let payload = deflate(data);
        self.entry(name, DEFLATE, data, &payload, &[])
    }

    /// Add an entry whose local header carries an extra field the central
    /// directory does not.
    pub fn stored_with_local_extra(self, name: &str, data: &[u8], extra: &[u8]) -> Self {
        self.entry(name, STORED, data, data, extra)
    }

    pub fn entry(
        mut self,
        name: &str,
        method: u16,
        data: &[u8],
        payload: &[u8],
        local_extra: &[u8],
    ) -> Self {
        let mut crc = flate2::Crc::new();
        crc.update(data);
        let crc = crc.sum();
        let offset = self.body.len() as u32;

        let w = &mut self.body;
        w.write_all(b"PK\x03\x04").unwrap();
        w.write_u16::<LittleEndian>(20).unwrap(); // version needed
        w.write_u16::<LittleEndian>(0).unwrap(); // flags
        w.write_u16::<LittleEndian>(method).unwrap();
        w.write_u16::<LittleEndian>(0).unwrap(); // mod time
        w.write_u16::<LittleEndian>(0x21).unwrap(); // mod date
        w.write_u32::<LittleEndian>(crc).unwrap();
        w.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        w.write_u32::<LittleEndian>(data.len() as u32).unwrap();
        w.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        w.write_u16::<LittleEndian>(local_extra.len() as u16).unwrap();
        w.write_all(name.as_bytes()).unwrap();
        w.write_all(local_extra).unwrap();
        w.write_all(payload).unwrap();

        let c = &mut self.central;
        c.write_all(b"PK\x01\x02").unwrap();
        c.write_u16::<LittleEndian>(20).unwrap(); // version made by
        c.write_u16::<LittleEndian>(20).unwrap(); // version needed
        c.write_u16::<LittleEndian>(0).unwrap(); // flags
        c.write_u16::<LittleEndian>(method).unwrap();
        c.write_u16::<LittleEndian>(0).unwrap();
        c.write_u16::<LittleEndian>(0x21).unwrap();
        c.write_u32::<LittleEndian>(crc).unwrap();
        c.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        c.write_u32::<LittleEndian>(data.len() as u32).unwrap();
        c.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        c.write_u16::<LittleEndian>(0).unwrap(); // extra
        c.write_u16::<LittleEndian>(0).unwrap(); // comment
        c.write_u16::<LittleEndian>(0).unwrap(); // disk start
        c.write_u16::<LittleEndian>(0).unwrap(); // internal attrs
        c.write_u32::<LittleEndian>(0).unwrap(); // external attrs
        c.write_u32::<LittleEndian>(offset).unwrap();
        c.write_all(name.as_bytes()).unwrap();

        self.count += 1;
        self
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = self.body;
        let cd_offset = out.len() as u32;
        out.extend_from_slice(&self.central);

        out.write_all(b"PK\x05\x06").unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(self.count).unwrap();
        out.write_u16::<LittleEndian>(self.count).unwrap();
        out.write_u32::<LittleEndian>(self.central.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(cd_offset).unwrap();
        out.write_u16::<LittleEndian>(self.comment.len() as u16).unwrap();
        out.write_all(&self.comment).unwrap();
        out
    }
}

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

pub const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

pub const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Clientes" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

pub const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;

pub fn shared_strings(strings: &[&str]) -> String {
    let items: String = strings.iter().map(|s| format!("<si><t>{s}</t></si>")).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{n}" uniqueCount="{n}">{items}</sst>"#,
        n = strings.len()
    )
}

pub fn worksheet(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><dimension ref="A1:B2"/><sheetData>{rows}</sheetData></worksheet>"#
    )
}

/// A one-sheet package with the usual parts, all deflated.
pub fn xlsx(shared: &[&str], rows: &str) -> Vec<u8> {
    ZipBuilder::new()
        .deflated("[Content_Types].xml", CONTENT_TYPES.as_bytes())
        .deflated("_rels/.rels", PACKAGE_RELS.as_bytes())
        .deflated("xl/workbook.xml", WORKBOOK.as_bytes())
        .deflated("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes())
        .deflated("xl/worksheets/sheet1.xml", worksheet(rows).as_bytes())
        .deflated("xl/sharedStrings.xml", shared_strings(shared).as_bytes())
        .finish()
}
