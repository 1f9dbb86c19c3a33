//! User Directory SDK
//!
//! Public contract of the `user_directory` module:
//! - `DirectoryClient` - trait for the remote user-directory collaborator
//! - `UserRecord`, `UserFields`, `Department` - data models
//! - `DirectoryError` - error taxonomy surfaced to users
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod errors;
pub mod models;

pub use client::DirectoryClient;
pub use errors::DirectoryError;
pub use models::{Department, ParseDepartmentError, UserFields, UserRecord};
