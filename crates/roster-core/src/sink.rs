use crate::domain::instructor::CandidateRecord;
use crate::domain::sync_run::{SyncMode, SyncOutcome};

/// Destination for a run's deduplicated candidates.
///
/// Implementations apply the whole batch atomically: on error nothing from
/// the batch is visible in the store.
pub trait InstructorSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn mode(&self) -> SyncMode;

    fn apply(&mut self, records: &[CandidateRecord]) -> Result<SyncOutcome, Self::Error>;
}
