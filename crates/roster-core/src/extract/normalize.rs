use crate::domain::email::email_in_domain;
use crate::extract::pairs::RawPair;

/// Text the upstream grid readers emit for a missing name cell.
pub const MISSING_NAME_PLACEHOLDER: &str = "nan";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPair {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Empty,
    ForeignDomain,
    Placeholder,
}

/// Applies the row policy shared by every block. `domain` is a normalized
/// bare domain such as `usf.edu`.
pub fn normalize_pair(pair: &RawPair, domain: &str) -> Result<NormalizedPair, DropReason> {
    if pair.name.is_blank() && pair.email.is_blank() {
        return Err(DropReason::Empty);
    }

    let name = pair.name.as_str().trim();
    let email = pair
        .email
        .as_str()
        .trim()
        .trim_end_matches(',')
        .trim_end();

    if !email_in_domain(email, domain) {
        return Err(DropReason::ForeignDomain);
    }

    // Blank is this reader's missing-cell sentinel; "nan" is the one older
    // exports carry in place of empty names.
    if name.is_empty() || name.eq_ignore_ascii_case(MISSING_NAME_PLACEHOLDER) {
        return Err(DropReason::Placeholder);
    }

    Ok(NormalizedPair {
        name: name.to_string(),
        email: email.to_ascii_lowercase(),
    })
}
