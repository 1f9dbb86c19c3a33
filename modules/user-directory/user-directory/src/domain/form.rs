//! Add/edit form state machine.
//!
//! The mode tag alone decides what a submission does. There is no separately
//! registered handler that could be left pointing at the wrong path.

use std::fmt;
use std::str::FromStr;

use user_directory_sdk::{Department, UserFields, UserRecord};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Add,
    Edit(u64),
}

/// Editable form fields. The id field is read-only and not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Department,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Department,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::Department => "Department",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_name" | "firstname" => Ok(FormField::FirstName),
            "last" | "last_name" | "lastname" => Ok(FormField::LastName),
            "email" => Ok(FormField::Email),
            "department" | "dept" => Ok(FormField::Department),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Shown in the read-only id field.
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl FormInput {
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Department => &self.department,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Department => &mut self.department,
        }
    }
}

/// What an accepted submission asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(UserFields),
    Update { id: u64, fields: UserFields },
}

/// Mode plus input, as seen by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    mode: FormMode,
    input: FormInput,
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub fn input(&self) -> &FormInput {
        &self.input
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        match self.mode {
            FormMode::Closed => None,
            FormMode::Add => Some("Add User"),
            FormMode::Edit(_) => Some("Edit User"),
        }
    }

    /// Switch to add mode with cleared fields. `next_id` is display-only.
    pub fn open_for_add(&mut self, next_id: u64) {
        self.mode = FormMode::Add;
        self.input = FormInput {
            id: Some(next_id),
            ..FormInput::default()
        };
    }

    /// Switch to edit mode pre-filled from `record`.
    ///
    /// `shown_department` fills the department field when the record has none,
    /// so the form starts from what the table displays.
    pub fn open_for_edit(&mut self, record: &UserRecord, shown_department: Department) {
        self.mode = FormMode::Edit(record.id);
        self.input = FormInput {
            id: Some(record.id),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            department: record
                .department
                .unwrap_or(shown_department)
                .name()
                .to_owned(),
        };
    }

    /// # Errors
    /// `FormNotOpen` when the form is closed.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::FormNotOpen);
        }
        value.clone_into(self.input.slot(field));
        Ok(())
    }

    /// Validate the input and describe the store change it requests.
    ///
    /// The form stays open; the caller closes it once the change is applied.
    ///
    /// # Errors
    /// `FormNotOpen` when closed, `MissingField` for the first blank field,
    /// `InvalidDepartment` when the department names no known department.
    pub fn submission(&self) -> Result<Submission, DomainError> {
        let fields = match self.mode {
            FormMode::Closed => return Err(DomainError::FormNotOpen),
            FormMode::Add | FormMode::Edit(_) => self.validated_fields()?,
        };
        Ok(match self.mode {
            FormMode::Edit(id) => Submission::Update { id, fields },
            FormMode::Add | FormMode::Closed => Submission::Create(fields),
        })
    }

    fn validated_fields(&self) -> Result<UserFields, DomainError> {
        for field in FormField::ALL {
            if self.input.value(field).trim().is_empty() {
                return Err(DomainError::missing_field(field));
            }
        }
        let department = self
            .input
            .department
            .parse::<Department>()
            .map_err(|e| DomainError::invalid_department(e.0))?;

        Ok(UserFields {
            first_name: self.input.first_name.trim().to_owned(),
            last_name: self.input.last_name.trim().to_owned(),
            email: self.input.email.trim().to_owned(),
            department,
        })
    }

    /// Discard input and close. No-op when already closed.
    pub fn cancel(&mut self) {
        self.close();
    }

    pub(crate) fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.input = FormInput::default();
    }
}
