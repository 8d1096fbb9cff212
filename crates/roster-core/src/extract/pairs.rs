use crate::extract::grid::{Cell, Grid};
use crate::extract::locate::Block;
use crate::extract::SheetLayout;

/// A positional (name, email) read from one block row, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub row: usize,
    pub name: Cell,
    pub email: Cell,
}

/// All rows strictly below the header row, to the end of the sheet.
pub fn extract_pairs(grid: &Grid, block: Block, layout: &SheetLayout) -> Vec<RawPair> {
    (layout.header_index() + 1..grid.height())
        .map(|row| RawPair {
            row,
            name: grid.cell(row, block.name_col).clone(),
            email: grid.cell(row, block.email_col).clone(),
        })
        .collect()
}
