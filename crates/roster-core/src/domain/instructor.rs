use crate::domain::ids::InstructorId;
use crate::domain::name::split_name;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// A normalized, name-split row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: String,
}

impl CandidateRecord {
    /// Builds a candidate from a normalized display name and email.
    pub fn from_display_name(name: &str, email: &str) -> Self {
        let split = split_name(name);
        Self {
            first_name: split.first,
            last_name: split.last,
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: String,
}

impl Instructor {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.last_name.trim().is_empty() {
            return Err(CoreError::EmptyLastName);
        }
        if !self.email.contains('@') {
            return Err(CoreError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// `first last`, or the email local part when both names are blank.
    pub fn display_name(&self) -> String {
        let joined = match self.first_name.as_deref() {
            Some(first) => format!("{} {}", first, self.last_name),
            None => self.last_name.clone(),
        };
        let joined = joined.trim();
        if !joined.is_empty() {
            return joined.to_string();
        }
        self.email
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(&self.email)
            .to_string()
    }
}
