use crate::error::CoreError;

pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Accepts `usf.edu` or `@usf.edu` and returns the bare lower-cased domain.
pub fn normalize_domain(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if bare.is_empty() || bare.contains('@') || bare.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidDomain(raw.to_string()));
    }
    Ok(bare.to_ascii_lowercase())
}

/// Case-insensitive `@domain` suffix check; `domain` must already be normalized.
pub fn email_in_domain(email: &str, domain: &str) -> bool {
    let email = email.to_ascii_lowercase();
    let Some(local) = email.strip_suffix(domain) else {
        return false;
    };
    local.ends_with('@')
}
