use crate::domain::instructor::CandidateRecord;
use std::collections::HashSet;

/// Removes exact (first, last, email) repeats, keeping first occurrences.
pub fn dedupe(records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    let mut seen: HashSet<CandidateRecord> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
