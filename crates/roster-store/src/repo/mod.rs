pub mod instructors;
pub mod sync_runs;

pub use instructors::{InstructorNew, InstructorsRepo};
pub use sync_runs::SyncRunsRepo;
