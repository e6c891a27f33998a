//! XLSX reader
//!
//! Reads the first worksheet of an exported workbook back into a
//! [`Matrix`]. Only cell text is read; formulas, styles and other sheets are
//! ignored.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_excel_escapes;
use gridform_core::{letters_to_column, Matrix};

const SHEET_PATH: &str = "xl/worksheets/sheet1.xml";
const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Largest row number a worksheet may use
const MAX_ROWS: usize = 1_048_576;
/// Largest column count a worksheet may use (`XFD`)
const MAX_COLS: usize = 16_384;
/// Largest sheet area read back into a [`Matrix`]
const MAX_CELLS: usize = 1 << 20;

/// Reader for the first sheet of an XLSX file
pub struct XlsxReader;

impl XlsxReader {
    /// Read the first sheet of a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Matrix> {
        let file = File::open(path)?;
        Self::read_matrix(BufReader::new(file))
    }

    /// Read the first sheet from any seekable reader
    pub fn read_matrix<R: Read + Seek>(reader: R) -> XlsxResult<Matrix> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let shared_strings = Self::read_shared_strings(&mut archive)?;
        Self::read_worksheet(&mut archive, &shared_strings)
    }

    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name(SHARED_STRINGS_PATH) {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"t" if in_si => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => current.push_str(&e.unescape()?),
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        shared_strings: &[String],
    ) -> XlsxResult<Matrix> {
        let file = archive
            .by_name(SHEET_PATH)
            .map_err(|_| XlsxError::MissingPart(SHEET_PATH.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();

        let mut cells = SheetCells::default();
        let mut dimension: Option<(usize, usize)> = None;

        // Current cell state
        let mut cell_pos: Option<(usize, usize)> = None;
        let mut cell_type = String::new();
        let mut text = String::new();
        let mut in_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"c" => {
                        let (pos, kind) = Self::cell_attrs(&e)?;
                        cell_pos = Some(pos);
                        cell_type = kind;
                        text.clear();
                    }
                    b"v" | b"t" if cell_pos.is_some() => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"c" => {
                        // Blank cell; still counts toward the sheet size
                        let ((row, col), _) = Self::cell_attrs(&e)?;
                        cells.place(row, col, String::new())?;
                    }
                    b"dimension" => dimension = Self::dimension_attr(&e),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text => text.push_str(&e.unescape()?),
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"v" | b"t" => in_text = false,
                    b"c" => {
                        if let Some((row, col)) = cell_pos.take() {
                            let value = Self::cell_value(&cell_type, &text, shared_strings)?;
                            cells.place(row, col, value)?;
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if let Some((last_row, last_col)) = dimension {
            cells.extend_to(last_row, last_col)?;
        }

        Ok(Matrix::from_rows(cells.rows))
    }

    fn cell_value(kind: &str, text: &str, shared_strings: &[String]) -> XlsxResult<String> {
        match kind {
            "s" => {
                let idx: usize = text.trim().parse().map_err(|_| {
                    XlsxError::InvalidFormat(format!("bad shared string index '{}'", text))
                })?;
                shared_strings.get(idx).cloned().ok_or_else(|| {
                    XlsxError::InvalidFormat(format!("shared string {} not found", idx))
                })
            }
            "b" => Ok(if text.trim() == "1" { "TRUE" } else { "FALSE" }.to_string()),
            _ => Ok(decode_excel_escapes(text)),
        }
    }

    /// Position and `t` attribute of a `<c>` element
    fn cell_attrs(e: &BytesStart<'_>) -> XlsxResult<((usize, usize), String)> {
        let mut reference = None;
        let mut kind = String::new();

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => reference = Some(attr.unescape_value()?.into_owned()),
                b"t" => kind = attr.unescape_value()?.into_owned(),
                _ => {}
            }
        }

        let reference = reference
            .ok_or_else(|| XlsxError::InvalidFormat("cell without a reference".into()))?;
        Ok((Self::parse_ref(&reference)?, kind))
    }

    /// Last cell of `<dimension ref="A1:E10"/>`
    fn dimension_attr(e: &BytesStart<'_>) -> Option<(usize, usize)> {
        let value = e
            .attributes()
            .flatten()
            .find(|a| a.key.as_ref() == b"ref")?
            .unescape_value()
            .ok()?;
        let last = value.rsplit(':').next()?;
        Self::parse_ref(last).ok()
    }

    /// 0-based `(row, col)` of an A1-style reference
    fn parse_ref(reference: &str) -> XlsxResult<(usize, usize)> {
        let bad = || XlsxError::InvalidFormat(format!("bad cell reference '{}'", reference));

        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(bad)?;
        let (letters, digits) = reference.split_at(split);
        let col = letters_to_column(letters).map_err(|_| bad())?;
        let row: usize = digits.parse().map_err(|_| bad())?;
        if row == 0 || row > MAX_ROWS || col >= MAX_COLS {
            return Err(bad());
        }
        Ok((row - 1, col))
    }
}

/// Cells read so far, growing on demand up to [`MAX_CELLS`]
#[derive(Default)]
struct SheetCells {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl SheetCells {
    /// Make room for `(row, col)`, failing if the padded sheet gets too large
    fn extend_to(&mut self, row: usize, col: usize) -> XlsxResult<()> {
        let height = self.rows.len().max(row + 1);
        let width = self.width.max(col + 1);
        if height.saturating_mul(width) > MAX_CELLS {
            return Err(XlsxError::InvalidFormat(format!(
                "sheet of {}x{} cells is too large",
                height, width
            )));
        }
        if self.rows.len() < height {
            self.rows.resize(height, Vec::new());
        }
        if self.rows[0].len() < width {
            self.rows[0].resize(width, String::new());
        }
        self.width = width;
        Ok(())
    }

    fn place(&mut self, row: usize, col: usize, value: String) -> XlsxResult<()> {
        self.extend_to(row, col)?;
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ref() {
        assert_eq!(XlsxReader::parse_ref("A1").unwrap(), (0, 0));
        assert_eq!(XlsxReader::parse_ref("E10").unwrap(), (9, 4));
        assert_eq!(XlsxReader::parse_ref("AA3").unwrap(), (2, 26));
        assert!(XlsxReader::parse_ref("A0").is_err());
        assert!(XlsxReader::parse_ref("12").is_err());
        assert!(XlsxReader::parse_ref("B").is_err());
        assert_eq!(XlsxReader::parse_ref("XFD1048576").unwrap(), (1_048_575, 16_383));
        assert!(XlsxReader::parse_ref("A1048577").is_err());
        assert!(XlsxReader::parse_ref("XFE1").is_err());
        assert!(XlsxReader::parse_ref("A4000000000").is_err());
    }

    #[test]
    fn test_sheet_cells_bounded() {
        let mut cells = SheetCells::default();
        cells.place(1, 2, "x".into()).unwrap();
        cells.extend_to(9, 4).unwrap();
        assert_eq!(cells.rows.len(), 10);
        assert_eq!(cells.width, 5);

        // Each reference is fine on its own but together they span too much
        cells.place(1023, 0, String::new()).unwrap();
        assert!(matches!(
            cells.place(0, 1024, String::new()),
            Err(XlsxError::InvalidFormat(_))
        ));
    }

    fn sheet_zip(xml: &str) -> Vec<u8> {
        use std::io::Write;

        let mut buf = Vec::new();
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        zip.start_file(SHEET_PATH, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
        buf
    }

    fn sheet_with_cells(cells: &str) -> Vec<u8> {
        sheet_zip(&format!(
            r#"<worksheet><sheetData><row r="1">{}</row></sheetData></worksheet>"#,
            cells
        ))
    }

    #[test]
    fn test_read_rejects_huge_reference() {
        let bytes = sheet_with_cells(r#"<c r="A4000000000"/>"#);
        let err = XlsxReader::read_matrix(std::io::Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidFormat(_)), "{err:?}");

        let bytes = sheet_with_cells(r#"<c r="A1048576"/><c r="XFD1"/>"#);
        let err = XlsxReader::read_matrix(std::io::Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidFormat(_)), "{err:?}");
    }

    #[test]
    fn test_read_dimension_pads_sheet() {
        let bytes = sheet_zip(
            r#"<worksheet><dimension ref="A1:C4"/><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>x</t></is></c></row></sheetData></worksheet>"#,
        );
        let matrix = XlsxReader::read_matrix(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(matrix.row_count(), 4);
        assert_eq!(matrix.col_count(), 3);
        assert_eq!(matrix.get(0, 0), Some("x"));
    }

    #[test]
    fn test_cell_value_kinds() {
        let shared = vec!["zero".to_string(), "one".to_string()];
        assert_eq!(XlsxReader::cell_value("s", "1", &shared).unwrap(), "one");
        assert!(XlsxReader::cell_value("s", "5", &shared).is_err());
        assert_eq!(XlsxReader::cell_value("b", "1", &shared).unwrap(), "TRUE");
        assert_eq!(XlsxReader::cell_value("n", "42", &shared).unwrap(), "42");
        assert_eq!(
            XlsxReader::cell_value("inlineStr", "a_x0001_", &shared).unwrap(),
            "a\u{1}"
        );
    }
}
