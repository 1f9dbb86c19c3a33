//! User-facing notification texts.

use super::error::DomainError;

pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this user?";
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const SELECT_DEPARTMENT: &str = "Please select a valid department.";
pub const USER_NOT_FOUND: &str = "User not found!";
pub const FORM_NOT_OPEN: &str = "Open the form with 'add' or 'edit' first.";
pub const ADD_FAILED: &str = "Error adding user. Please try again.";
pub const DELETE_FAILED: &str = "Error deleting user. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load user data.";

impl DomainError {
    /// Text shown to the user when this error ends an action.
    ///
    /// `Remote` only reaches callers from a load, so it maps to the load notice.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            DomainError::MissingField { .. } => FILL_ALL_FIELDS,
            DomainError::InvalidDepartment { .. } => SELECT_DEPARTMENT,
            DomainError::UserNotFound { .. } => USER_NOT_FOUND,
            DomainError::FormNotOpen => FORM_NOT_OPEN,
            DomainError::DuplicateId { .. } | DomainError::IdsExhausted => ADD_FAILED,
            DomainError::Remote(_) => LOAD_FAILED,
        }
    }
}
