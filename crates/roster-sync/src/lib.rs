pub mod error;
pub mod pipeline;
pub mod workbook;

pub use error::{Result, SyncError};
pub use pipeline::{extract_workbook, sync_workbook, SyncReport, WorkbookSource};
