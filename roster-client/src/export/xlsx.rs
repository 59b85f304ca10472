//! Minimal OOXML workbook: one sheet, inline strings, no styles

use std::io::{Cursor, Write};

use shared::models::Employee;
use zip::ZipWriter;
use zip::write::FileOptions;

use super::record_cells;
use crate::{ClientError, ClientResult};

pub const XLSX_FILE_NAME: &str = "employees.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Employees";
pub const XLSX_HEADERS: [&str; 7] = [
    "ID",
    "firstName",
    "lastName",
    "email",
    "contact",
    "designation",
    "salary",
];

const COLUMNS: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

pub(super) fn write_workbook(employees: &[&Employee]) -> ClientResult<Vec<u8>> {
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(SHEET_NAME)
    );
    let sheet = worksheet(employees);

    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts: [(&str, &str); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", workbook.as_str()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ];
        for (name, body) in parts {
            zip.start_file(name, options)
                .map_err(|e| ClientError::Export(e.to_string()))?;
            zip.write_all(body.as_bytes())?;
        }
        zip.finish()
            .map_err(|e| ClientError::Export(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

fn worksheet(employees: &[&Employee]) -> String {
    let mut rows = String::new();

    rows.push_str(r#"<row r="1">"#);
    for (col, header) in COLUMNS.iter().zip(XLSX_HEADERS) {
        rows.push_str(&string_cell(&format!("{col}1"), header));
    }
    rows.push_str("</row>");

    for (idx, employee) in employees.iter().enumerate() {
        let r = idx + 2;
        rows.push_str(&format!(r#"<row r="{r}">"#));
        // ID is the display position, stored as a number
        rows.push_str(&format!(r#"<c r="A{r}"><v>{}</v></c>"#, idx + 1));
        for (col, value) in COLUMNS[1..].iter().zip(record_cells(employee)) {
            rows.push_str(&string_cell(&format!("{col}{r}"), &value));
        }
        rows.push_str("</row>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{rows}</sheetData></worksheet>"#
    )
}

fn string_cell(reference: &str, value: &str) -> String {
    format!(
        r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        escape_xml(value)
    )
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("R&D <lead>"), "R&amp;D &lt;lead&gt;");
        assert_eq!(escape_xml("O'Neil \"Jr\""), "O&apos;Neil &quot;Jr&quot;");
        assert_eq!(escape_xml("a\u{1}b"), "ab");
    }

    #[test]
    fn test_empty_sheet_has_header_only() {
        let sheet = worksheet(&[]);
        assert!(sheet.contains(r#"<row r="1">"#));
        assert!(!sheet.contains(r#"<row r="2">"#));
        assert!(sheet.contains(">designation</t>"));
    }
}
