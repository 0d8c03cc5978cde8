use thiserror::Error;

/// Rejections produced while turning raw request input into domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid account id")]
    InvalidAccountId,
}

/// Trims `raw` and rejects it when nothing is left.
pub(crate) fn required(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_owned())
}
