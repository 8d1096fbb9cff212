use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitName {
    pub first: Option<String>,
    pub last: String,
}

/// Splits a display name on its first space.
///
/// Everything after the first space is kept verbatim as the last name, so
/// "Maria De La Cruz" becomes ("Maria", "De La Cruz"). Periods are removed
/// from the first part only ("J. Smith" becomes ("J", "Smith")). Only a
/// single token has no first name; ". Smith" keeps an empty one.
pub fn split_name(raw: &str) -> SplitName {
    let collapsed = raw.replace("  ", " ");
    let trimmed = collapsed.trim();
    match trimmed.split_once(' ') {
        Some((head, tail)) => {
            let first = head.replace('.', "");
            SplitName {
                first: Some(first.trim().to_string()),
                last: tail.trim().to_string(),
            }
        }
        None => SplitName {
            first: None,
            last: trimmed.to_string(),
        },
    }
}
