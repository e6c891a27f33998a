//! XLSX writer

use std::io::{Seek, Write};

use crate::error::XlsxResult;
use crate::escape::{escape_cell_text, needs_preserve};
use crate::SHEET_NAME;
use gridform_core::{column_label, Matrix};

/// XLSX encoder for a single-sheet workbook
pub struct XlsxWriter;

impl XlsxWriter {
    /// Encode a matrix into an in-memory XLSX payload
    pub fn to_bytes(matrix: &Matrix) -> XlsxResult<Vec<u8>> {
        let mut buf = Vec::new();
        Self::write(matrix, std::io::Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Write a matrix to a writer
    pub fn write<W: Write + Seek>(matrix: &Matrix, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        // Write [Content_Types].xml
        Self::write_content_types(&mut zip)?;

        // Write _rels/.rels
        Self::write_root_rels(&mut zip)?;

        // Write xl/workbook.xml and its relationships
        Self::write_workbook_xml(&mut zip)?;
        Self::write_workbook_rels(&mut zip)?;

        // Write xl/styles.xml
        Self::write_styles_xml(&mut zip)?;

        // Write the only worksheet
        Self::write_worksheet(&mut zip, matrix)?;

        zip.finish()?;
        Ok(())
    }

    fn start_part<W: Write + Seek>(zip: &mut zip::ZipWriter<W>, name: &str) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        zip.start_file(name, options)?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        Self::start_part(zip, "[Content_Types].xml")?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        Self::start_part(zip, "_rels/.rels")?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        Self::start_part(zip, "xl/workbook.xml")?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
            escape_cell_text(SHEET_NAME)
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        Self::start_part(zip, "xl/_rels/workbook.xml.rels")?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        Self::start_part(zip, "xl/styles.xml")?;

        // Minimal stylesheet: one font, the two mandatory fills, one border
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        matrix: &Matrix,
    ) -> XlsxResult<()> {
        Self::start_part(zip, "xl/worksheets/sheet1.xml")?;

        let content = Self::worksheet_xml(matrix);
        log::debug!(
            "Encoding {}x{} sheet ({} bytes of XML)",
            matrix.row_count(),
            matrix.col_count(),
            content.len()
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Build the worksheet part
    ///
    /// Every cell of the matrix is emitted, blank ones as bare `<c>` elements,
    /// so the sheet always spans the whole grid.
    fn worksheet_xml(matrix: &Matrix) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        let rows = matrix.row_count();
        let cols = matrix.col_count();

        if rows > 0 && cols > 0 {
            content.push_str(&format!(
                "\n    <dimension ref=\"A1:{}{}\"/>",
                column_label(cols - 1),
                rows
            ));
        }

        content.push_str("\n    <sheetData>");

        for (row, values) in matrix.rows().iter().enumerate() {
            content.push_str(&format!(
                "\n        <row r=\"{}\" spans=\"1:{}\">",
                row + 1,
                cols.max(1)
            ));

            for (col, value) in values.iter().enumerate() {
                let cell_ref = format!("{}{}", column_label(col), row + 1);
                if value.is_empty() {
                    content.push_str(&format!("\n            <c r=\"{}\"/>", cell_ref));
                } else {
                    let space = if needs_preserve(value) {
                        " xml:space=\"preserve\""
                    } else {
                        ""
                    };
                    content.push_str(&format!(
                        "\n            <c r=\"{}\" t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                        cell_ref,
                        space,
                        escape_cell_text(value)
                    ));
                }
            }

            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");
        content
    }
}
