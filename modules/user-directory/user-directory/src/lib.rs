//! User directory module.
//!
//! Keeps an in-memory view of a remote user directory, projects it into a
//! table, drives an add/edit form, and mirrors creates and deletes to the
//! remote service on a best-effort basis.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::UserDirectoryConfig;
pub use domain::error::DomainError;
pub use domain::form::{FormController, FormField, FormInput, FormMode, Submission};
pub use domain::ports::{ConfirmPrompt, FixedConfirm, NoopTableView, TableView};
pub use domain::service::{
    ActionOutcome, DeleteOutcome, DirectoryController, RemoteSync, SubmitOutcome,
};
pub use domain::store::ViewStateStore;
pub use domain::table::{RowAction, TableRenderer, TableRow};
pub use infra::remote::HttpDirectoryClient;
pub use module::{ModuleError, UserDirectoryModule};
