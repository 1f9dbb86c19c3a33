use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use user_directory_sdk::{DirectoryClient, DirectoryError, UserRecord};

use super::error::DomainError;
use super::form::{FormController, FormField, FormInput, FormMode, Submission};
use super::notices;
use super::ports::{ConfirmPrompt, TableView};
use super::store::ViewStateStore;
use super::table::{RowAction, TableRenderer, TableRow};

// ============================================================================
// Outcomes
// ============================================================================

/// Result of the best-effort remote call that follows a local change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSync {
    Synced,
    Failed(DirectoryError),
}

impl RemoteSync {
    #[must_use]
    pub fn is_synced(&self) -> bool {
        matches!(self, RemoteSync::Synced)
    }

    fn from_result(operation: &'static str, id: u64, result: Result<(), DirectoryError>) -> Self {
        match result {
            Ok(()) => {
                debug!(operation, id, "remote sync succeeded");
                RemoteSync::Synced
            }
            Err(err) => {
                warn!(operation, id, error = %err, "remote sync failed, local change kept");
                RemoteSync::Failed(err)
            }
        }
    }
}

/// `echo` is the service's view of a created record, merged field by field
/// with the local one. It is informational; `record` stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created {
        record: UserRecord,
        remote: RemoteSync,
        echo: Option<UserRecord>,
    },
    Updated {
        record: UserRecord,
    },
}

impl SubmitOutcome {
    #[must_use]
    pub fn record(&self) -> &UserRecord {
        match self {
            SubmitOutcome::Created { record, .. } | SubmitOutcome::Updated { record } => record,
        }
    }

    /// Notice to surface, if the remote side failed.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Created {
                remote: RemoteSync::Failed(_),
                ..
            } => Some(notices::ADD_FAILED),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Removed { record: UserRecord, remote: RemoteSync },
}

impl DeleteOutcome {
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            DeleteOutcome::Removed {
                remote: RemoteSync::Failed(_),
                ..
            } => Some(notices::DELETE_FAILED),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    EditOpened(FormInput),
    Delete(DeleteOutcome),
}

// ============================================================================
// Controller
// ============================================================================

#[derive(Debug, Default)]
struct DirectoryState {
    store: ViewStateStore,
    form: FormController,
}

/// Orchestrates store, form, table view and remote sync.
///
/// Store and form share one lock. It is held for synchronous mutation and the
/// render call only, never across a remote call.
pub struct DirectoryController {
    state: Mutex<DirectoryState>,
    client: Arc<dyn DirectoryClient>,
    view: Arc<dyn TableView>,
    confirm: Arc<dyn ConfirmPrompt>,
}

impl DirectoryController {
    #[must_use]
    pub fn new(
        client: Arc<dyn DirectoryClient>,
        view: Arc<dyn TableView>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            state: Mutex::new(DirectoryState::default()),
            client,
            view,
            confirm,
        }
    }

    /// Fetch all users and re-seed the store. Any open form is closed.
    ///
    /// Returns the number of records now in the store.
    ///
    /// # Errors
    /// `Remote` when the fetch fails; the store is left as it was.
    pub async fn load(&self) -> Result<usize, DomainError> {
        let records = self.client.fetch_all().await.map_err(|err| {
            warn!(error = %err, "failed to load users");
            DomainError::from(err)
        })?;

        let mut state = self.state.lock();
        state.form.close();
        state.store.seed(records);
        self.render(&state.store);
        info!(count = state.store.len(), "users loaded");
        Ok(state.store.len())
    }

    /// Same as [`load`](Self::load).
    ///
    /// # Errors
    /// See [`load`](Self::load).
    pub async fn reload(&self) -> Result<usize, DomainError> {
        self.load().await
    }

    /// Open the form in add mode and return its initial contents.
    #[must_use]
    pub fn open_for_add(&self) -> FormInput {
        let mut state = self.state.lock();
        let next_id = state.store.peek_next_id();
        state.form.open_for_add(next_id);
        state.form.input().clone()
    }

    /// Open the form in edit mode for `id`, pre-filled from the store.
    ///
    /// # Errors
    /// `UserNotFound` when `id` is absent; form and store are unchanged.
    pub fn open_for_edit(&self, id: u64) -> Result<FormInput, DomainError> {
        let mut state = self.state.lock();
        let (position, record) = state
            .store
            .position(id)
            .zip(state.store.get(id).cloned())
            .ok_or_else(|| DomainError::user_not_found(id))?;
        let shown = TableRenderer::displayed_department(&record, position);
        state.form.open_for_edit(&record, shown);
        Ok(state.form.input().clone())
    }

    /// # Errors
    /// `FormNotOpen` when the form is closed.
    pub fn set_field(&self, field: FormField, value: &str) -> Result<(), DomainError> {
        self.state.lock().form.set_field(field, value)
    }

    /// Snapshot of the form.
    #[must_use]
    pub fn form(&self) -> FormController {
        self.state.lock().form.clone()
    }

    pub fn cancel(&self) {
        self.state.lock().form.cancel();
    }

    /// Apply the open form to the store.
    ///
    /// Add mode allocates an id and appends in one critical section, closes
    /// the form and re-renders before the remote create is attempted. Edit mode
    /// updates in place and makes no remote call.
    ///
    /// # Errors
    /// `FormNotOpen`, `MissingField` or `InvalidDepartment` from validation
    /// (the form stays open), `UserNotFound` if the edit target is gone,
    /// `IdsExhausted` if no new id can be assigned.
    pub async fn submit(&self) -> Result<SubmitOutcome, DomainError> {
        let created = {
            let mut state = self.state.lock();
            match state.form.submission()? {
                Submission::Update { id, fields } => {
                    let record = state.store.update(id, fields)?.clone();
                    state.form.close();
                    self.render(&state.store);
                    info!(id, "user updated");
                    return Ok(SubmitOutcome::Updated { record });
                }
                Submission::Create(fields) => {
                    let record = state.store.create(fields)?;
                    state.form.close();
                    self.render(&state.store);
                    info!(id = record.id, "user added");
                    record
                }
            }
        };

        let (echo, result) = match self.client.create(&created).await {
            Ok(echo) => (Some(echo), Ok(())),
            Err(err) => (None, Err(err)),
        };
        let remote = RemoteSync::from_result("create", created.id, result);
        Ok(SubmitOutcome::Created {
            record: created,
            remote,
            echo,
        })
    }

    /// Ask for confirmation, then remove `id` locally and remotely.
    ///
    /// A remote failure is reported in the outcome and never rolls the local
    /// removal back. Removing the current edit target closes the form.
    ///
    /// # Errors
    /// `UserNotFound` when `id` is absent, checked before prompting.
    pub async fn delete(&self, id: u64) -> Result<DeleteOutcome, DomainError> {
        if self.state.lock().store.get(id).is_none() {
            return Err(DomainError::user_not_found(id));
        }
        if !self.confirm.confirm(notices::CONFIRM_DELETE).await {
            debug!(id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let record = {
            let mut state = self.state.lock();
            let record = state.store.remove(id)?;
            if state.form.mode() == FormMode::Edit(id) {
                state.form.close();
            }
            self.render(&state.store);
            info!(id, "user deleted");
            record
        };

        let remote = RemoteSync::from_result("remove", id, self.client.remove(id).await);
        Ok(DeleteOutcome::Removed { record, remote })
    }

    /// Route a row action to edit or delete.
    ///
    /// # Errors
    /// Whatever the routed operation returns.
    pub async fn dispatch(&self, action: RowAction) -> Result<ActionOutcome, DomainError> {
        match action {
            RowAction::Edit(id) => self.open_for_edit(id).map(ActionOutcome::EditOpened),
            RowAction::Delete(id) => self.delete(id).await.map(ActionOutcome::Delete),
        }
    }

    #[must_use]
    pub fn rows(&self) -> Vec<TableRow> {
        TableRenderer::render(&self.state.lock().store)
    }

    #[must_use]
    pub fn records(&self) -> Vec<UserRecord> {
        self.state.lock().store.records().to_vec()
    }

    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.state.lock().store.peek_next_id()
    }

    fn render(&self, store: &ViewStateStore) {
        self.view.render(&TableRenderer::render(store));
    }
}
