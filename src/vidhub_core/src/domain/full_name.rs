use serde::Serialize;

use super::validation::{ValidationError, required};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullName(String);

impl FullName {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        required(raw.as_ref(), "fullName").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
