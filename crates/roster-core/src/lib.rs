pub mod domain;
pub mod dto;
pub mod error;
pub mod extract;
pub mod sink;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use extract::{extract_candidates, Cell, ExtractOptions, ExtractReport, Extraction, Grid};
pub use sink::InstructorSink;
