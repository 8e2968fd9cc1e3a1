use serde::{Deserialize, Serialize};

use super::error::{DomainError, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) nickname: String,
    pub(crate) email: String,
}

impl User {
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        validate_profile(&self.nickname, &self.email)
    }
}

/// Email format is left to the transport; the core only requires both fields to be present.
pub(crate) fn validate_profile(nickname: &str, email: &str) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    if nickname.is_empty() {
        errors.push(FieldError {
            field: "nickname",
            message: "must not be empty",
        });
    }
    if email.is_empty() {
        errors.push(FieldError {
            field: "email",
            message: "must not be empty",
        });
    }
    DomainError::check(errors)
}
