use crate::error::{Result, SyncError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use roster_core::extract::{Cell, Grid};
use std::path::Path;

/// Reads one sheet into a grid whose indices are absolute sheet positions.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Grid> {
    if !path.exists() {
        return Err(SyncError::MissingWorkbook(path.to_path_buf()));
    }
    let mut workbook = open_workbook_auto(path).map_err(|source| SyncError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let names = workbook.sheet_names();
    if !names.iter().any(|name| name == sheet) {
        return Err(SyncError::MissingSheet {
            sheet: sheet.to_string(),
            available: names.join(", "),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|source| SyncError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(grid_from_range(&range))
}

/// calamine trims leading empty rows and columns from a range; they are
/// restored here so the header row keeps its sheet position.
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::default();
    };
    let start_row = start_row as usize;
    let start_col = start_col as usize;

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Blank; start_col];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }
    Grid::new(rows)
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Blank,
        Data::String(value) => Cell::from(value.as_str()),
        Data::Int(value) => Cell::Text(value.to_string()),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            Cell::Text((*value as i64).to_string())
        }
        other => Cell::Text(other.to_string()),
    }
}
