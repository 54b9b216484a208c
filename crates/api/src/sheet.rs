//! Decoding of uploaded workbooks into raw header/cell rows.
//!
//! Only structural failures (unreadable archive, no worksheet) are errors
//! here. Cell-level problems are not: every cell decodes to a
//! [`CellValue`] and the normalizer downstream decides what it means.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rackledger_core::normalize::{CellValue, RawRow};

/// Structural failure while opening an uploaded workbook.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Unreadable workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,
}

/// Decode the first worksheet of an uploaded workbook payload. The
/// format (xlsx, xls, ods) is sniffed from the bytes.
///
/// The first row is taken as the header row; each following row becomes
/// one [`RawRow`] pairing every non-blank header with the cell beneath
/// it. Rows whose cells are all blank are dropped, as are columns whose
/// header cell is blank.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<RawRow>, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for row in rows_iter {
        let raw: RawRow = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.trim().is_empty())
            .map(|(header, cell)| (header.clone(), cell_value(cell)))
            .collect();

        let all_blank = raw
            .iter()
            .all(|(_, cell)| cell.as_text().trim().is_empty());
        if !all_blank {
            rows.push(raw);
        }
    }
    Ok(rows)
}

/// Map one workbook cell onto the normalizer's input type.
///
/// Date-formatted cells surface as their raw serial number; the
/// normalizer owns serial decoding so the rules stay in one place.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Text(String::new()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn cell_text(cell: &Data) -> String {
    cell_value(cell).as_text()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn pairs_headers_with_cells() {
        let bytes = workbook_bytes(&[
            &["Server Name", "IP"],
            &["app-01", "10.0.0.1"],
        ]);
        let rows = read_rows(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            vec![
                (
                    "Server Name".to_string(),
                    CellValue::Text("app-01".to_string())
                ),
                ("IP".to_string(), CellValue::Text("10.0.0.1".to_string())),
            ]
        );
    }

    #[test]
    fn numeric_cells_surface_as_numbers() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Allocated Date").unwrap();
        sheet.write_number(1, 0, 45000.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = read_rows(&bytes).unwrap();
        assert_eq!(rows[0][0].1, CellValue::Number(45000.0));
    }

    #[test]
    fn blank_rows_and_blank_headers_are_dropped() {
        let bytes = workbook_bytes(&[
            &["Server Name", "", "IP"],
            &["app-01", "ignored", "10.0.0.1"],
            &["", "", ""],
        ]);
        let rows = read_rows(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn header_only_sheet_yields_no_rows() {
        let bytes = workbook_bytes(&[&["Server Name", "IP"]]);
        assert!(read_rows(&bytes).unwrap().is_empty());
    }

    #[test]
    fn garbage_payload_is_a_workbook_error() {
        assert!(matches!(
            read_rows(b"not an xlsx archive"),
            Err(SheetError::Workbook(_))
        ));
    }
}
