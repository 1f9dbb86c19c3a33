//! Outbound seams the controller drives, implemented by front ends.

use async_trait::async_trait;

use super::table::TableRow;

/// Receives the full table after every mutation.
pub trait TableView: Send + Sync {
    fn render(&self, rows: &[TableRow]);
}

/// Yes/no gate asked before a delete.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt with the same value.
pub struct FixedConfirm(pub bool);

#[async_trait]
impl ConfirmPrompt for FixedConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Discards rendered tables.
pub struct NoopTableView;

impl TableView for NoopTableView {
    fn render(&self, _rows: &[TableRow]) {}
}
