//! Wire shapes of the remote users endpoint.

use serde::{Deserialize, Serialize};
use user_directory_sdk::{Department, UserRecord};

/// A user as returned by `GET /users` and echoed by `POST /users`.
///
/// The service sends many more fields (address, phone, company); they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUserDto {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl RemoteUserDto {
    /// Unknown department names are dropped, leaving the table fallback to apply.
    #[must_use]
    pub fn into_record(self) -> UserRecord {
        let (first_name, last_name) = split_full_name(&self.name);
        let department = self
            .department
            .as_deref()
            .and_then(|d| d.parse::<Department>().ok());
        UserRecord {
            id: self.id,
            first_name,
            last_name,
            email: self.email.trim().to_owned(),
            department,
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUserDto<'a> {
    pub id: u64,
    pub name: String,
    pub email: &'a str,
    pub department: Option<&'static str>,
}

impl<'a> From<&'a UserRecord> for NewUserDto<'a> {
    fn from(record: &'a UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.full_name(),
            email: &record.email,
            department: record.department.map(Department::name),
        }
    }
}

/// Split on the first run of whitespace. The remainder, if any, is the last name.
#[must_use]
pub fn split_full_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_owned(), rest.trim().to_owned()),
        None => (name.to_owned(), String::new()),
    }
}
