use crate::domain::instructor::{CandidateRecord, Instructor};
use std::collections::HashMap;

/// Field changes an incoming candidate makes to a stored instructor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameRefinement {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NameRefinement {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Only non-empty incoming values that differ from the stored ones win.
pub fn refine_names(existing: &Instructor, incoming: &CandidateRecord) -> NameRefinement {
    let mut refinement = NameRefinement::default();

    if let Some(first) = non_empty(incoming.first_name.as_deref()) {
        if existing.first_name.as_deref() != Some(first) {
            refinement.first_name = Some(first.to_string());
        }
    }

    if let Some(last) = non_empty(Some(incoming.last_name.as_str())) {
        if existing.last_name != last {
            refinement.last_name = Some(last.to_string());
        }
    }

    refinement
}

/// Collapses candidates that share an email, case-insensitively, into one.
///
/// The first occurrence fixes the position; later candidates override a
/// field only when they carry a non-empty value for it.
pub fn fold_by_email(records: &[CandidateRecord]) -> Vec<CandidateRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut folded: Vec<CandidateRecord> = Vec::new();

    for record in records {
        let key = record.email.trim().to_ascii_lowercase();
        match index.get(&key) {
            Some(&pos) => {
                let target = &mut folded[pos];
                if let Some(first) = non_empty(record.first_name.as_deref()) {
                    target.first_name = Some(first.to_string());
                }
                if let Some(last) = non_empty(Some(record.last_name.as_str())) {
                    target.last_name = last.to_string();
                }
            }
            None => {
                index.insert(key.clone(), folded.len());
                folded.push(CandidateRecord {
                    first_name: non_empty(record.first_name.as_deref()).map(str::to_string),
                    last_name: record.last_name.trim().to_string(),
                    email: key,
                });
            }
        }
    }

    folded
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
