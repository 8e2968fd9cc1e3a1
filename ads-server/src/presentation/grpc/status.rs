use tonic::Status;

use crate::domain::error::DomainError;

pub(crate) fn map_domain_error(err: DomainError) -> Status {
    match err {
        DomainError::Validation(_) => Status::invalid_argument(err.to_string()),
        DomainError::UserNotFound(_) | DomainError::AdNotFound(_) => {
            Status::not_found(err.to_string())
        }
        DomainError::Forbidden => Status::permission_denied(err.to_string()),
    }
}

/// Ad creation needs an existing author, so a missing one is a precondition failure.
pub(crate) fn map_create_ad_error(err: DomainError) -> Status {
    match err {
        DomainError::UserNotFound(_) => Status::failed_precondition(err.to_string()),
        other => map_domain_error(other),
    }
}

pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, Status> {
    value.ok_or_else(|| {
        Status::invalid_argument(format!("required argument '{field}' is missing"))
    })
}
