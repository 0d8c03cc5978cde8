use secrecy::{ExposeSecret, Secret};

use super::validation::ValidationError;

/// Plaintext password as received from the caller. Hashing is the store's job.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Accepts any password that is not blank; the value itself is kept verbatim.
    pub fn parse(raw: Secret<String>, field: &'static str) -> Result<Self, ValidationError> {
        if raw.expose_secret().trim().is_empty() {
            return Err(ValidationError::Missing(field));
        }
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(raw, "password")
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
