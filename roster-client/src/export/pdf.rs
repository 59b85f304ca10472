//! Tabular PDF: A4 portrait, Helvetica 10pt, shaded header on every page
//!
//! Cell text is encoded to WinAnsi (the font's declared encoding) and wrapped
//! to the column width using the Helvetica glyph metrics; rows grow to fit
//! their tallest cell, so no cell text is ever dropped.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use shared::models::Employee;

use super::record_cells;
use crate::{ClientError, ClientResult};

pub const PDF_FILE_NAME: &str = "employees.pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_HEADERS: [&str; 7] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Contact",
    "Designation",
    "Salary",
];

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_X: f32 = 40.0;
/// 20mm
const MARGIN_TOP: f32 = 56.7;
const MARGIN_BOTTOM: f32 = 40.0;

const FONT_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 12.0;
const CELL_PADDING_X: f32 = 4.0;
const CELL_PADDING_Y: f32 = 3.0;

/// Column widths, summing to the printable width (515pt)
const COLUMN_WIDTHS: [f32; 7] = [34.0, 75.0, 75.0, 126.0, 70.0, 75.0, 60.0];

/// Header fill (slate)
const HEADER_FILL: [f32; 3] = [100.0 / 255.0, 116.0 / 255.0, 139.0 / 255.0];

/// Helvetica advance widths (1/1000 em) for WinAnsi codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Width used for codes outside the ASCII table (accented letters are mostly 556)
const DEFAULT_GLYPH_WIDTH: u16 = 556;

/// Substitute for characters WinAnsi cannot represent
const REPLACEMENT: u8 = b'?';

/// One table row after wrapping: encoded lines per cell
struct RowLayout {
    cells: Vec<Vec<Vec<u8>>>,
    height: f32,
}

impl RowLayout {
    fn new(cells: &[String; 7]) -> Self {
        let cells: Vec<Vec<Vec<u8>>> = cells
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(cell, width)| wrap(&win_ansi(cell), width - 2.0 * CELL_PADDING_X))
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        Self {
            cells,
            height: lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING_Y,
        }
    }
}

pub(super) fn write_document(employees: &[&Employee]) -> ClientResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let header = RowLayout::new(&PDF_HEADERS.map(str::to_string));
    let rows: Vec<RowLayout> = employees
        .iter()
        .enumerate()
        .map(|(idx, employee)| {
            let [first, last, email, contact, designation, salary] = record_cells(employee);
            RowLayout::new(&[
                (idx + 1).to_string(),
                first,
                last,
                email,
                contact,
                designation,
                salary,
            ])
        })
        .collect();

    let mut kids: Vec<Object> = Vec::new();
    for page in paginate(&rows, header.height) {
        let content = page_content(&header, &page);
        let encoded = content
            .encode()
            .map_err(|e| ClientError::Export(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ClientError::Export(e.to_string()))?;
    Ok(bytes)
}

/// Split rows into pages below a repeated header
///
/// An empty export still yields one page carrying the header. A row taller
/// than a whole page is placed alone on its own page.
fn paginate(rows: &[RowLayout], header_height: f32) -> Vec<Vec<&RowLayout>> {
    let available = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM - header_height;
    let mut pages: Vec<Vec<&RowLayout>> = Vec::new();
    let mut current: Vec<&RowLayout> = Vec::new();
    let mut used = 0.0;

    for row in rows {
        if !current.is_empty() && used + row.height > available {
            pages.push(std::mem::take(&mut current));
            used = 0.0;
        }
        used += row.height;
        current.push(row);
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

fn page_content(header: &RowLayout, rows: &[&RowLayout]) -> Content {
    let mut ops = Vec::new();
    let table_width: f32 = COLUMN_WIDTHS.iter().sum();

    // Header background
    let header_top = PAGE_HEIGHT - MARGIN_TOP;
    ops.push(Operation::new(
        "rg",
        HEADER_FILL.iter().map(|c| (*c).into()).collect(),
    ));
    ops.push(Operation::new(
        "re",
        vec![
            MARGIN_X.into(),
            (header_top - header.height).into(),
            table_width.into(),
            header.height.into(),
        ],
    ));
    ops.push(Operation::new("f", vec![]));

    // Header text in white
    push_row(&mut ops, header, header_top, [1.0, 1.0, 1.0]);

    // Body rows in black
    let mut top = header_top - header.height;
    for row in rows {
        push_row(&mut ops, row, top, [0.0, 0.0, 0.0]);
        top -= row.height;
    }

    Content { operations: ops }
}

fn push_row(ops: &mut Vec<Operation>, row: &RowLayout, top: f32, color: [f32; 3]) {
    let mut x = MARGIN_X;

    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec!["F1".into(), FONT_SIZE.into()],
    ));
    ops.push(Operation::new(
        "rg",
        color.iter().map(|c| (*c).into()).collect(),
    ));
    for (lines, width) in row.cells.iter().zip(COLUMN_WIDTHS) {
        for (idx, line) in lines.iter().enumerate() {
            let baseline = top - CELL_PADDING_Y - LINE_HEIGHT * (idx as f32 + 1.0)
                + (LINE_HEIGHT - FONT_SIZE);
            ops.push(Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    (x + CELL_PADDING_X).into(),
                    baseline.into(),
                ],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(line.clone(), StringFormat::Literal)],
            ));
        }
        x += width;
    }
    ops.push(Operation::new("ET", vec![]));
}

/// Encode `text` to WinAnsi (Windows-1252), one byte per character
fn win_ansi(text: &str) -> Vec<u8> {
    let mut buf = [0u8; 4];
    text.chars()
        .map(|ch| {
            let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
            match &*bytes {
                [byte] if !had_errors => *byte,
                _ => REPLACEMENT,
            }
        })
        .collect()
}

fn glyph_width(byte: u8) -> f32 {
    let units = match byte {
        32..=126 => HELVETICA_WIDTHS[usize::from(byte - 32)],
        _ => DEFAULT_GLYPH_WIDTH,
    };
    f32::from(units) * FONT_SIZE / 1000.0
}

fn text_width(text: &[u8]) -> f32 {
    text.iter().map(|b| glyph_width(*b)).sum()
}

/// Break encoded text into lines no wider than `max_width`
///
/// Breaks after the last space when there is one, otherwise mid-word.
/// Spaces stay at the end of the line they follow, so the lines joined
/// back together are exactly the input.
fn wrap(text: &[u8], max_width: f32) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let mut line_width = 0.0;
    let mut last_space: Option<usize> = None;

    for &byte in text {
        let width = glyph_width(byte);
        if byte != b' ' && !line.is_empty() && line_width + width > max_width {
            if let Some(split) = last_space.take().filter(|&s| s < line.len()) {
                let rest = line.split_off(split);
                lines.push(std::mem::replace(&mut line, rest));
                line_width = text_width(&line);
            }
            if !line.is_empty() && line_width + width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
        }
        line.push(byte);
        line_width += width;
        if byte == b' ' {
            last_space = Some(line.len());
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_line_row() -> RowLayout {
        RowLayout::new(&["1", "Ana", "Li", "a@x.com", "555", "Eng", "90000"].map(str::to_string))
    }

    #[test]
    fn test_columns_span_printable_width() {
        let total: f32 = COLUMN_WIDTHS.iter().sum();
        assert_eq!(total, PAGE_WIDTH - 2.0 * MARGIN_X);
    }

    #[test]
    fn test_headers_fit_on_one_line() {
        let header = RowLayout::new(&PDF_HEADERS.map(str::to_string));
        assert!(header.cells.iter().all(|lines| lines.len() == 1));
        assert_eq!(header.height, 18.0);
    }

    #[test]
    fn test_wrap_keeps_every_character() {
        let email = b"jose.mueller@example-corporation.com";
        let lines = wrap(email, 118.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line) <= 118.0));
        assert_eq!(lines.concat(), email.to_vec());

        let title = b"Senior Software Engineer";
        let lines = wrap(title, 67.0);
        assert_eq!(lines, vec![b"Senior ".to_vec(), b"Software ".to_vec(), b"Engineer".to_vec()]);
    }

    #[test]
    fn test_wrap_empty_is_one_empty_line() {
        assert_eq!(wrap(b"", 50.0), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi("José"), vec![74, 111, 115, 233]);
        assert_eq!(win_ansi("Zoë €5"), vec![b'Z', b'o', 0xEB, b' ', 0x80, b'5']);
        assert_eq!(win_ansi("李"), vec![REPLACEMENT]);
    }

    #[test]
    fn test_wrapped_row_grows() {
        let row = RowLayout::new(
            &["1", "Ana", "Li", "a@x.com", "555", "Senior Software Engineer", "90000"]
                .map(str::to_string),
        );
        assert_eq!(row.cells[5].len(), 3);
        assert_eq!(row.height, 3.0 * LINE_HEIGHT + 2.0 * CELL_PADDING_Y);
    }

    #[test]
    fn test_paginate_by_height() {
        let rows: Vec<RowLayout> = (0..41).map(|_| single_line_row()).collect();
        let pages = paginate(&rows, 18.0);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 40);
        assert_eq!(pages[1].len(), 1);

        assert_eq!(paginate(&[], 18.0).len(), 1);
    }
}
