mod common;

use common::{WORKBOOK, WORKBOOK_RELS, ZipBuilder, shared_strings, worksheet, xlsx};
use sheetload::{Error, Record, parse_spreadsheet};

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn xlsx_with_inline_strings() {
    let rows = r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Nombre</t></is></c><c r="B1" t="inlineStr"><is><t>Monto</t></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>Ana</t></is></c><c r="B2"><v>10.5</v></c></row>"#;
    let buf = xlsx(&["Total"], rows);

    let records = parse_spreadsheet(&buf, "clientes.xlsx").unwrap();
    assert_eq!(records, vec![record(&[("Nombre", "Ana"), ("Monto", "10.5")])]);
}

#[test]
fn xlsx_with_shared_strings() {
    let rows = r#"<row r="1" spans="1:2"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
<row r="2" spans="1:2"><c r="A2" t="s"><v>2</v></c><c r="B2" s="1"><v>10.5</v></c></row>
<row r="3" spans="1:2"><c r="A3" s="1"/><c r="B3" s="1"/></row>
<row r="4" spans="1:2"><c r="A4" t="s"><v>3</v></c><c r="B4"><v>7</v></c></row>"#;
    let buf = xlsx(&["Nombre", "Monto", "Ana", "Luis &amp; Co"], rows);

    let records = parse_spreadsheet(&buf, "Clientes.XLSM").unwrap();
    assert_eq!(
        records,
        vec![
            record(&[("Nombre", "Ana"), ("Monto", "10.5")]),
            record(&[("Nombre", "Luis & Co"), ("Monto", "7")]),
        ]
    );
}

#[test]
fn xlsx_header_holes_have_no_key() {
    let rows = r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1" t="s"><v>1</v></c></row><row r="2"><c r="A2"><v>1</v></c><c r="B2" t="str"><v>x</v></c><c r="C2"><v>3</v></c></row>"#;
    let buf = xlsx(&["Nombre", "Monto"], rows);

    let records = parse_spreadsheet(&buf, "clientes.xlsx").unwrap();
    assert_eq!(records, vec![record(&[("Nombre", "1"), ("Monto", "3")])]);
}

#[test]
fn xlsx_empty_header_cell_becomes_numbered_column() {
    let rows = r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>2</v></c><c r="C1" t="s"><v>1</v></c></row><row r="2"><c r="A2"><v>1</v></c><c r="B2" t="str"><v>x</v></c><c r="C2"><v>3</v></c></row>"#;
    let buf = xlsx(&["Nombre", "Monto", "  "], rows);

    let records = parse_spreadsheet(&buf, "clientes.xlsx").unwrap();
    assert_eq!(
        records,
        vec![record(&[("Nombre", "1"), ("Column 2", "x"), ("Monto", "3")])]
    );
}

#[test]
fn xlsx_far_header_column_stays_small() {
    let rows = r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="ZZZZZ1" t="s"><v>1</v></c></row><row r="2"><c r="A2"><v>1</v></c><c r="ZZZZZ2"><v>2</v></c></row>"#;
    let buf = xlsx(&["Nombre", "Monto"], rows);

    let records = parse_spreadsheet(&buf, "clientes.xlsx").unwrap();
    assert_eq!(records, vec![record(&[("Nombre", "1"), ("Monto", "2")])]);
}

#[test]
fn xlsx_without_shared_strings_part() {
    let sheet = worksheet(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Id</t></is></c></row><row r="2"><c r="A2"><v>42</v></c></row>"#,
    );
    let buf = ZipBuilder::new()
        .deflated("xl/workbook.xml", WORKBOOK.as_bytes())
        .deflated("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes())
        .stored("xl/worksheets/sheet1.xml", sheet.as_bytes())
        .finish();

    let records = parse_spreadsheet(&buf, "ids.xlsx").unwrap();
    assert_eq!(records, vec![record(&[("Id", "42")])]);
}

#[test]
fn xlsx_reads_only_first_declared_sheet() {
    let workbook = r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Segunda" sheetId="2" r:id="rId7"/><sheet name="Primera" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
    let rels = r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/></Relationships>"#;
    let first = worksheet(r#"<row><c t="inlineStr"><is><t>Hoja</t></is></c></row><row><c t="inlineStr"><is><t>uno</t></is></c></row>"#);
    let second = worksheet(r#"<row><c t="inlineStr"><is><t>Hoja</t></is></c></row><row><c t="inlineStr"><is><t>dos</t></is></c></row>"#);
    let buf = ZipBuilder::new()
        .deflated("xl/workbook.xml", workbook.as_bytes())
        .deflated("xl/_rels/workbook.xml.rels", rels.as_bytes())
        .deflated("xl/worksheets/sheet1.xml", first.as_bytes())
        .deflated("xl/worksheets/sheet2.xml", second.as_bytes())
        .finish();

    let records = parse_spreadsheet(&buf, "libro.xlsx").unwrap();
    assert_eq!(records, vec![record(&[("Hoja", "dos")])]);
}

#[test]
fn xlsx_missing_parts() {
    let no_workbook = ZipBuilder::new().stored("a.txt", b"hello").finish();
    assert_eq!(
        parse_spreadsheet(&no_workbook, "a.xlsx").unwrap_err(),
        Error::MissingWorkbookPart("xl/workbook.xml".to_string())
    );

    let no_rels = ZipBuilder::new().deflated("xl/workbook.xml", WORKBOOK.as_bytes()).finish();
    assert_eq!(
        parse_spreadsheet(&no_rels, "a.xlsx").unwrap_err(),
        Error::MissingWorkbookPart("xl/_rels/workbook.xml.rels".to_string())
    );

    let no_sheet = ZipBuilder::new()
        .deflated("xl/workbook.xml", WORKBOOK.as_bytes())
        .deflated("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes())
        .deflated("xl/sharedStrings.xml", shared_strings(&["x"]).as_bytes())
        .finish();
    assert_eq!(
        parse_spreadsheet(&no_sheet, "a.xlsx").unwrap_err(),
        Error::MissingWorkbookPart("xl/worksheets/sheet1.xml".to_string())
    );

    let no_declaration = ZipBuilder::new()
        .deflated("xl/workbook.xml", b"<workbook><sheets/></workbook>")
        .finish();
    assert!(matches!(
        parse_spreadsheet(&no_declaration, "a.xlsx").unwrap_err(),
        Error::MissingWorkbookPart(_)
    ));
}

#[test]
fn xlsx_unknown_relationship_id() {
    let rels = r#"<Relationships><Relationship Id="rId9" Target="worksheets/sheet9.xml"/></Relationships>"#;
    let buf = ZipBuilder::new()
        .deflated("xl/workbook.xml", WORKBOOK.as_bytes())
        .deflated("xl/_rels/workbook.xml.rels", rels.as_bytes())
        .finish();
    assert!(matches!(
        parse_spreadsheet(&buf, "a.xlsx").unwrap_err(),
        Error::MissingWorkbookPart(_)
    ));
}

#[test]
fn xlsx_workbook_located_through_package_rels() {
    let package_rels = r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/book/main.xml"/></Relationships>"#;
    let rels = r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="sheets/one.xml"/></Relationships>"#;
    let sheet = worksheet(r#"<row><c t="inlineStr"><is><t>k</t></is></c></row><row><c><v>1</v></c></row>"#);
    let buf = ZipBuilder::new()
        .stored("_rels/.rels", package_rels.as_bytes())
        .stored("book/main.xml", WORKBOOK.as_bytes())
        .stored("book/_rels/main.xml.rels", rels.as_bytes())
        .stored("book/sheets/one.xml", sheet.as_bytes())
        .finish();

    let records = parse_spreadsheet(&buf, "a.xlsx").unwrap();
    assert_eq!(records, vec![record(&[("k", "1")])]);
}

#[test]
fn csv_end_to_end() {
    let records = parse_spreadsheet(b"Nombre,Monto\nAna,10.5\n\n", "clientes.csv").unwrap();
    assert_eq!(records, vec![record(&[("Nombre", "Ana"), ("Monto", "10.5")])]);
}

#[test]
fn csv_and_xlsx_agree() {
    let from_csv = parse_spreadsheet(b"Nombre,Monto\r\nAna,10.5\r\n", "clientes.CSV").unwrap();
    let rows = r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row><row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>10.5</v></c></row>"#;
    let from_xlsx = parse_spreadsheet(&xlsx(&["Nombre", "Monto", "Ana"], rows), "clientes.xlsx").unwrap();
    assert_eq!(from_csv, from_xlsx);
}

#[test]
fn semicolon_and_tab_files() {
    let records = parse_spreadsheet("Cliente;CUIT;Monto\n\"Pérez; Juan\";20-12345678-3;1.234,50\n".as_bytes(), "export.txt").unwrap();
    assert_eq!(records[0]["Cliente"], "Pérez; Juan");
    assert_eq!(records[0]["Monto"], "1.234,50");

    let records = parse_spreadsheet(b"a\tb\n1\t2\n", "export.txt").unwrap();
    assert_eq!(records, vec![record(&[("a", "1"), ("b", "2")])]);
}

#[test]
fn header_only_yields_no_records() {
    assert!(parse_spreadsheet(b"Nombre,Monto\n", "clientes.csv").unwrap().is_empty());
    assert!(parse_spreadsheet(b"", "clientes.csv").unwrap().is_empty());
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let buf = xlsx(&["Nombre"], "");
    assert_eq!(
        parse_spreadsheet(&buf, "factura.pdf").unwrap_err(),
        Error::UnsupportedFileType("factura.pdf".to_string())
    );
}

#[test]
fn parallel_calls_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let text = format!("n,v\nrow{i},{i}\n");
                parse_spreadsheet(text.as_bytes(), "t.csv").unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let records = handle.join().unwrap();
        assert_eq!(records[0]["v"], i.to_string());
    }
}
