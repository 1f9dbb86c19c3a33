//! Authoritative in-memory collection of users.

use user_directory_sdk::{UserFields, UserRecord};

use super::error::DomainError;

/// Ordered user records plus the next-id counter.
///
/// Order is display order: fetch order for seeded records, then insertion
/// order. `next_id` is always one more than the largest id ever held, so ids
/// of deleted records are never handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStateStore {
    records: Vec<UserRecord>,
    next_id: u64,
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace the whole collection and recompute the counter from it.
    ///
    /// Later duplicates of an id already seen are dropped, as are records
    /// whose id leaves no room for a following id.
    pub fn seed(&mut self, records: Vec<UserRecord>) {
        let mut unique: Vec<UserRecord> = Vec::with_capacity(records.len());
        let mut next_id = 1;
        for record in records {
            let Some(following) = record.id.checked_add(1) else {
                tracing::warn!(id = record.id, "dropping user id with no successor from seed");
                continue;
            };
            if unique.iter().any(|r| r.id == record.id) {
                tracing::warn!(id = record.id, "dropping duplicate user id from seed");
                continue;
            }
            next_id = next_id.max(following);
            unique.push(record);
        }

        self.next_id = next_id;
        self.records = unique;
        tracing::debug!(
            count = self.records.len(),
            next_id = self.next_id,
            "store seeded"
        );
    }

    /// The id the next [`allocate_id`](Self::allocate_id) call will return.
    #[must_use]
    pub fn peek_next_id(&self) -> u64 {
        self.next_id
    }

    /// Hand out the next id and advance the counter.
    ///
    /// # Errors
    /// `IdsExhausted` when the counter cannot advance past the next id.
    pub fn allocate_id(&mut self) -> Result<u64, DomainError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(DomainError::IdsExhausted)?;
        Ok(id)
    }

    /// Append a record.
    ///
    /// # Errors
    /// `DuplicateId` if a record with the same id is present, `IdsExhausted`
    /// if no id could follow it.
    pub fn add(&mut self, record: UserRecord) -> Result<(), DomainError> {
        if self.get(record.id).is_some() {
            return Err(DomainError::DuplicateId { id: record.id });
        }
        let following = record.id.checked_add(1).ok_or(DomainError::IdsExhausted)?;
        self.next_id = self.next_id.max(following);
        self.records.push(record);
        Ok(())
    }

    /// Allocate an id and append a record built from `fields`, as one step.
    ///
    /// # Errors
    /// `IdsExhausted` from [`allocate_id`](Self::allocate_id).
    pub fn create(&mut self, fields: UserFields) -> Result<UserRecord, DomainError> {
        let id = self.allocate_id()?;
        let record = UserRecord::from_fields(id, fields);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replace the mutable fields of the record with `id`.
    ///
    /// # Errors
    /// `UserNotFound` if no record has `id`.
    pub fn update(&mut self, id: u64, fields: UserFields) -> Result<&UserRecord, DomainError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        record.apply(fields);
        Ok(record)
    }

    /// Delete the record with `id`.
    ///
    /// # Errors
    /// `UserNotFound` if no record has `id`, including on a repeated removal.
    pub fn remove(&mut self, id: u64) -> Result<UserRecord, DomainError> {
        let position = self
            .position(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        Ok(self.records.remove(position))
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    #[must_use]
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
