//! End-to-end tests for XLSX export (store -> matrix -> file -> read back)

use std::io::{Cursor, Read};

use chrono::{TimeZone, Utc};
use gridform_core::{CellStore, COLS, ROWS};
use gridform_xlsx::{export_file_name, ExportWriter, XlsxError, XlsxReader, XlsxWriter};
use pretty_assertions::assert_eq;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

/// An empty grid exports as a 10x5 sheet of blank cells
#[test]
fn test_export_empty_grid() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ExportWriter::new(dir.path());

    let path = writer.write(&CellStore::new().to_matrix()).unwrap();
    assert!(path.is_absolute());
    assert!(path.starts_with(dir.path().canonicalize().unwrap()));

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("data_") && name.ends_with(".xlsx"));

    let matrix = XlsxReader::read_file(&path).unwrap();
    assert_eq!(matrix.row_count(), ROWS);
    assert_eq!(matrix.col_count(), COLS);
    assert!(matrix.rows().iter().flatten().all(String::is_empty));
}

/// Written values come back cell for cell
#[test]
fn test_export_roundtrip_values() {
    let mut store = CellStore::new();
    store.set(0, "Q1").unwrap();
    store.set(4, "Special: <>&\"'").unwrap();
    store.set(12, "Multi\nLine").unwrap();
    store.set(13, "Windows\r\nLine").unwrap();
    store.set(23, "  padded  ").unwrap();
    store.set(31, "Unicode: \u{1F600}").unwrap();
    store.set(38, "bell\u{7}").unwrap();
    store.set(49, "_x0041_").unwrap();

    let expected = store.to_matrix();
    let bytes = XlsxWriter::to_bytes(&expected).unwrap();
    let matrix = XlsxReader::read_matrix(Cursor::new(&bytes)).unwrap();

    assert_eq!(matrix, expected);
}

/// The package has one sheet with the fixed name
#[test]
fn test_workbook_parts() {
    let bytes = XlsxWriter::to_bytes(&CellStore::new().to_matrix()).unwrap();

    let workbook = read_part(&bytes, "xl/workbook.xml");
    assert!(workbook.contains(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#));
    assert_eq!(workbook.matches("<sheet ").count(), 1);

    let content_types = read_part(&bytes, "[Content_Types].xml");
    assert!(content_types.contains("/xl/worksheets/sheet1.xml"));

    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<dimension ref="A1:E10"/>"#));
}

/// Exporting into a missing directory fails with a write error
#[test]
fn test_export_to_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ExportWriter::new(dir.path().join("does-not-exist"));

    let mut store = CellStore::new();
    store.set(0, "kept").unwrap();
    let before = store.clone();

    let err = writer.write(&store.to_matrix()).unwrap_err();
    assert!(matches!(err, XlsxError::Write { .. }), "got {err:?}");
    assert!(err.is_write_error());
    assert_eq!(store, before);
}

/// Exporting "into" a regular file fails with a write error
#[test]
fn test_export_to_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let err = ExportWriter::new(&blocker)
        .write(&CellStore::new().to_matrix())
        .unwrap_err();
    assert!(err.is_write_error(), "got {err:?}");
}

/// Two exports in the same tick produce two files
#[test]
fn test_same_tick_exports_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ExportWriter::new(dir.path());
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let mut store = CellStore::new();
    store.set(0, "first").unwrap();
    let first = writer.write_at(&store.to_matrix(), at).unwrap();
    store.set(0, "second").unwrap();
    let second = writer.write_at(&store.to_matrix(), at).unwrap();

    assert_ne!(first, second);
    assert_eq!(
        first.file_name().unwrap().to_str().unwrap(),
        export_file_name(at)
    );
    assert_eq!(
        second.file_name().unwrap().to_str().unwrap(),
        "data_20240102030405000_1.xlsx"
    );

    let first_matrix = XlsxReader::read_file(&first).unwrap();
    let second_matrix = XlsxReader::read_file(&second).unwrap();
    assert_eq!(first_matrix.get(0, 0), Some("first"));
    assert_eq!(second_matrix.get(0, 0), Some("second"));
}

/// Reading something that is not a workbook fails cleanly
#[test]
fn test_read_invalid_file() {
    let result = XlsxReader::read_matrix(Cursor::new(b"not a zip".to_vec()));
    assert!(matches!(result, Err(XlsxError::Zip(_))));
}
