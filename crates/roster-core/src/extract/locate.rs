use crate::extract::grid::Grid;
use crate::extract::SheetLayout;

/// Adjacent name/email columns under a recognized header pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub name_col: usize,
    pub email_col: usize,
}

/// Every adjacent header pair in the header row, left to right.
pub fn locate_blocks(grid: &Grid, layout: &SheetLayout) -> Vec<Block> {
    let header = grid.row(layout.header_index());
    header
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            pair[0].as_str() == layout.name_header && pair[1].as_str() == layout.email_header
        })
        .map(|(col, _)| Block {
            name_col: col,
            email_col: col + 1,
        })
        .collect()
}
