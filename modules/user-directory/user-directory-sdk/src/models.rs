//! Public models for the `user_directory` module.
//!
//! Transport-agnostic data structures shared by the store, the controller
//! and the remote client.

use std::fmt;
use std::str::FromStr;

/// Fixed set of departments a user can belong to.
///
/// Declaration order is significant: it is the cycle used when a record
/// carries no department of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Engineering,
    Marketing,
    Hr,
    Sales,
    Finance,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 5] = [
        Department::Engineering,
        Department::Marketing,
        Department::Hr,
        Department::Sales,
        Department::Finance,
    ];

    /// Display name, as shown in the table and sent to the remote service.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Hr => "HR",
            Department::Sales => "Sales",
            Department::Finance => "Finance",
        }
    }

    /// Department at `position` in the display cycle.
    #[must_use]
    pub fn cyclic(position: usize) -> Department {
        Self::ALL[position % Self::ALL.len()]
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names none of the [`Department`]s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown department '{0}'")]
pub struct ParseDepartmentError(pub String);

impl FromStr for Department {
    type Err = ParseDepartmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseDepartmentError(wanted.to_owned()))
    }
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `None` for records seeded from the remote service, which carries no department.
    pub department: Option<Department>,
}

impl UserRecord {
    /// Build a record from submitted form fields.
    #[must_use]
    pub fn from_fields(id: u64, fields: UserFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            department: Some(fields.department),
        }
    }

    /// Replace every mutable field. The id is never touched.
    pub fn apply(&mut self, fields: UserFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.email = fields.email;
        self.department = Some(fields.department);
    }

    /// `"first last"`, or just the first name when the last name is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// The mutable part of a [`UserRecord`], as submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_parse_is_case_insensitive() {
        assert_eq!("hr".parse::<Department>(), Ok(Department::Hr));
        assert_eq!(" Sales ".parse::<Department>(), Ok(Department::Sales));
        assert_eq!(
            "Legal".parse::<Department>(),
            Err(ParseDepartmentError("Legal".to_owned()))
        );
    }

    #[test]
    fn test_department_cycle() {
        assert_eq!(Department::cyclic(0), Department::Engineering);
        assert_eq!(Department::cyclic(4), Department::Finance);
        assert_eq!(Department::cyclic(5), Department::Engineering);
        assert_eq!(Department::cyclic(7), Department::Hr);
        assert_eq!(Department::Hr.to_string(), "HR");
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut record = UserRecord {
            id: 9,
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            email: "jane@x.com".to_owned(),
            department: None,
        };
        record.apply(UserFields {
            first_name: "Janet".to_owned(),
            last_name: "Dough".to_owned(),
            email: "janet@x.com".to_owned(),
            department: Department::Finance,
        });
        assert_eq!(record.id, 9);
        assert_eq!(record.full_name(), "Janet Dough");
        assert_eq!(record.department, Some(Department::Finance));
    }

    #[test]
    fn test_full_name_without_last_name() {
        let record = UserFields {
            first_name: "Cher".to_owned(),
            last_name: String::new(),
            email: "cher@x.com".to_owned(),
            department: Department::Sales,
        };
        assert_eq!(UserRecord::from_fields(1, record).full_name(), "Cher");
    }
}
