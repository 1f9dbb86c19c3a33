use thiserror::Error;
use user_directory_sdk::DirectoryError;

use super::form::FormField;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: u64 },

    #[error("Field '{field}' cannot be empty")]
    MissingField { field: FormField },

    #[error("Unknown department '{value}'")]
    InvalidDepartment { value: String },

    #[error("The user form is not open")]
    FormNotOpen,

    #[error("User id {id} is already in use")]
    DuplicateId { id: u64 },

    #[error("No user ids left to assign")]
    IdsExhausted,

    #[error(transparent)]
    Remote(#[from] DirectoryError),
}

impl DomainError {
    #[must_use]
    pub fn user_not_found(id: u64) -> Self {
        Self::UserNotFound { id }
    }

    #[must_use]
    pub fn missing_field(field: FormField) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_department(value: impl Into<String>) -> Self {
        Self::InvalidDepartment {
            value: value.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for DirectoryError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::UserNotFound { id } => DirectoryError::not_found(id),
            DomainError::MissingField { field } => {
                DirectoryError::validation(format!("{field} cannot be empty"))
            }
            DomainError::InvalidDepartment { value } => {
                DirectoryError::validation(format!("Unknown department: {value}"))
            }
            DomainError::FormNotOpen => DirectoryError::validation("The user form is not open"),
            DomainError::DuplicateId { id } => {
                DirectoryError::validation(format!("User id {id} is already in use"))
            }
            DomainError::IdsExhausted => DirectoryError::validation("No user ids left to assign"),
            DomainError::Remote(err) => err,
        }
    }
}
