use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{DomainError, FieldError};

pub(crate) const TITLE_MAX_CHARS: usize = 99;
pub(crate) const TEXT_MAX_CHARS: usize = 499;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Ad {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) author_id: i64,
    pub(crate) published: bool,
    pub(crate) date_created: DateTime<Utc>,
    pub(crate) date_changed: DateTime<Utc>,
}

impl Ad {
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        validate_content(&self.title, &self.text)
    }
}

pub(crate) fn validate_content(title: &str, text: &str) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    if let Some(err) = check_length("title", title, TITLE_MAX_CHARS, "must be 1..99 chars") {
        errors.push(err);
    }
    if let Some(err) = check_length("text", text, TEXT_MAX_CHARS, "must be 1..499 chars") {
        errors.push(err);
    }
    DomainError::check(errors)
}

fn check_length(
    field: &'static str,
    value: &str,
    max_chars: usize,
    message: &'static str,
) -> Option<FieldError> {
    let len = value.chars().count();
    if len == 0 || len > max_chars {
        return Some(FieldError { field, message });
    }
    None
}
