pub mod email;
pub mod ids;
pub mod instructor;
pub mod merge;
pub mod name;
pub mod sync_run;

pub use email::{email_in_domain, normalize_domain, normalize_email};
pub use ids::{InstructorId, SyncRunId};
pub use instructor::{CandidateRecord, Instructor};
pub use merge::{fold_by_email, refine_names, NameRefinement};
pub use name::{split_name, SplitName};
pub use sync_run::{SyncMode, SyncOutcome, SyncRun};
