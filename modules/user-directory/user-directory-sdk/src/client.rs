//! `DirectoryClient` trait definition.

use async_trait::async_trait;

use crate::errors::DirectoryError;
use crate::models::UserRecord;

/// Remote user-directory collaborator.
///
/// Implementations perform I/O only and never touch local view state. The
/// backing service is not required to persist writes: a successful `create`
/// or `remove` may not be visible on the next `fetch_all`.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch the full user collection. No partial results on failure.
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, DirectoryError>;

    /// Send a locally created record.
    ///
    /// The returned record always carries `record.id`; the service's echo is
    /// never authoritative for the id.
    async fn create(&self, record: &UserRecord) -> Result<UserRecord, DirectoryError>;

    /// Delete a record by id.
    async fn remove(&self, id: u64) -> Result<(), DirectoryError>;
}
