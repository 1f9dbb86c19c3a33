//! Projection of the store into table rows.

use user_directory_sdk::{Department, UserRecord};

use super::store::ViewStateStore;

/// Per-row action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(u64),
    Delete(u64),
}

impl RowAction {
    #[must_use]
    pub fn id(self) -> u64 {
        match self {
            RowAction::Edit(id) | RowAction::Delete(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    /// Edit then Delete, both bound to this row's id.
    pub actions: [RowAction; 2],
}

/// Stateless renderer. Output depends only on the store contents.
pub struct TableRenderer;

impl TableRenderer {
    #[must_use]
    pub fn render(store: &ViewStateStore) -> Vec<TableRow> {
        store
            .records()
            .iter()
            .enumerate()
            .map(|(position, record)| TableRow {
                id: record.id,
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
                email: record.email.clone(),
                department: Self::displayed_department(record, position),
                actions: [RowAction::Edit(record.id), RowAction::Delete(record.id)],
            })
            .collect()
    }

    /// The record's own department, or the cyclic fallback for its current position.
    #[must_use]
    pub fn displayed_department(record: &UserRecord, position: usize) -> Department {
        record
            .department
            .unwrap_or_else(|| Department::cyclic(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_directory_sdk::UserFields;

    fn bare(id: u64) -> UserRecord {
        UserRecord {
            id,
            first_name: format!("User{id}"),
            last_name: "Test".to_owned(),
            email: format!("u{id}@x.com"),
            department: None,
        }
    }

    #[test]
    fn test_rows_follow_store_order() {
        let mut store = ViewStateStore::new();
        store.seed(vec![bare(3), bare(1), bare(4)]);
        let rows = TableRenderer::render(&store);
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 4]);
        assert_eq!(rows[1].actions, [RowAction::Edit(1), RowAction::Delete(1)]);
    }

    #[test]
    fn test_fallback_departments_cycle() {
        let mut store = ViewStateStore::new();
        store.seed((1..=7).map(bare).collect());
        let depts: Vec<Department> = TableRenderer::render(&store)
            .into_iter()
            .map(|r| r.department)
            .collect();
        assert_eq!(
            depts,
            vec![
                Department::Engineering,
                Department::Marketing,
                Department::Hr,
                Department::Sales,
                Department::Finance,
                Department::Engineering,
                Department::Marketing,
            ]
        );
    }

    #[test]
    fn test_explicit_department_wins() {
        let mut store = ViewStateStore::new();
        store.seed(vec![bare(1)]);
        store
            .update(
                1,
                UserFields {
                    first_name: "Ann".to_owned(),
                    last_name: "Lee".to_owned(),
                    email: "ann@x.com".to_owned(),
                    department: Department::Finance,
                },
            )
            .unwrap();
        assert_eq!(
            TableRenderer::render(&store)[0].department,
            Department::Finance
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut store = ViewStateStore::new();
        store.seed(vec![bare(2), bare(5)]);
        assert_eq!(TableRenderer::render(&store), TableRenderer::render(&store));
    }

    #[test]
    fn test_empty_store_renders_nothing() {
        assert!(TableRenderer::render(&ViewStateStore::new()).is_empty());
    }
}
