// Excel workbook import (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::row::{rows_from_grid, CatalogRow, ColumnMapping};
use crate::SourceError;

/// Load catalog rows from the mapped sheet of a workbook.
pub fn load_rows(path: &Path, mapping: &ColumnMapping) -> Result<Vec<CatalogRow>, SourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match &mapping.sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| *s == name)
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound(name.clone()))?,
        None => sheet_names.first().cloned().ok_or(SourceError::NoSheets)?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SourceError::Open {
            path: path.display().to_string(),
            message: format!("failed to read sheet '{sheet_name}': {e}"),
        })?;

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let leading_cols = start_col as usize;

    // Every row is read; the sheet format itself bounds the height
    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut line = vec![String::new(); leading_cols];
        line.extend(row.iter().map(cell_text));
        grid.push(line);
    }

    log::debug!("read {} row(s) from sheet '{sheet_name}'", grid.len());
    rows_from_grid(grid, mapping)
}

/// Render a cell as text; integers print without decimals.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
        let mut wb = Workbook::new();
        for (name, lines) in sheets {
            let ws = wb.add_worksheet();
            ws.set_name(*name).unwrap();
            for (r, line) in lines.iter().enumerate() {
                for (c, value) in line.iter().enumerate() {
                    if !value.is_empty() {
                        ws.write_string(r as u32, c as u16, *value).unwrap();
                    }
                }
            }
        }
        wb.save(path).unwrap();
    }

    #[test]
    fn reads_first_sheet_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day1.xlsx");
        write_workbook(
            &path,
            &[
                ("Day1", &[&["province", "municipality"], &["Abra", "Bangued"], &["Abra", "Boliney"]]),
                ("Other", &[&["province", "municipality"], &["Cebu", "Argao"]]),
            ],
        );

        let rows = load_rows(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].province, "Abra");
        assert_eq!(rows[1].municipality, "Boliney");
        assert_eq!(rows[1].row_number, 3);
    }

    #[test]
    fn reads_named_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day1.xlsx");
        write_workbook(
            &path,
            &[
                ("Day1", &[&["province", "municipality"], &["Abra", "Bangued"]]),
                ("Other", &[&["province", "municipality"], &["Cebu", "Argao"]]),
            ],
        );

        let mapping = ColumnMapping {
            sheet: Some("Other".into()),
            ..Default::default()
        };
        let rows = load_rows(&path, &mapping).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].province, "Cebu");
    }

    #[test]
    fn unknown_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day1.xlsx");
        write_workbook(&path, &[("Day1", &[&["province", "municipality"]])]);

        let mapping = ColumnMapping {
            sheet: Some("Day9".into()),
            ..Default::default()
        };
        let err = load_rows(&path, &mapping).unwrap_err();
        assert!(matches!(err, SourceError::SheetNotFound(ref s) if s == "Day9"));
    }

    #[test]
    fn data_offset_from_a1_keeps_row_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");
        write_workbook(
            &path,
            &[("Day1", &[&[], &["", "province", "municipality"], &["", "Abra", "Tayum"]])],
        );

        let mapping = ColumnMapping {
            header_row: 1,
            ..Default::default()
        };
        let rows = load_rows(&path, &mapping).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].municipality, "Tayum");
        assert_eq!(rows[0].row_number, 3);
    }

    #[test]
    fn reads_rows_past_65536() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tall.xlsx");
        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.write_string(0, 0, "province").unwrap();
        ws.write_string(0, 1, "municipality").unwrap();
        ws.write_string(1, 0, "Abra").unwrap();
        ws.write_string(1, 1, "Bangued").unwrap();
        ws.write_string(70_000, 0, "Cebu").unwrap();
        ws.write_string(70_000, 1, "Argao").unwrap();
        wb.save(&path).unwrap();

        let rows = load_rows(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].province, "Cebu");
        assert_eq!(rows[1].row_number, 70_001);
    }

    #[test]
    fn missing_file() {
        let err = load_rows(Path::new("/nonexistent/day1.xlsx"), &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, SourceError::Open { .. }));
    }

    #[test]
    fn float_cells_render_as_integers() {
        assert_eq!(cell_text(&Data::Float(1401.0)), "1401");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
