#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test doubles for user-directory integration tests

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use user_directory::{ConfirmPrompt, DirectoryController, TableRow, TableView};
use user_directory_sdk::{DirectoryClient, DirectoryError, UserRecord};

pub fn user(id: u64, name: &str, email: &str) -> UserRecord {
    let (first, last) = name.split_once(' ').unwrap_or((name, ""));
    UserRecord {
        id,
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: email.to_owned(),
        department: None,
    }
}

/// In-memory remote with switchable failures.
///
/// With `hold_first_create` set, the next `create` signals `create_started`
/// and waits for `release_create` before answering.
#[derive(Default)]
pub struct FakeDirectory {
    pub users: Mutex<Vec<UserRecord>>,
    pub created: Mutex<Vec<UserRecord>>,
    pub removed: Mutex<Vec<u64>>,
    pub fail_fetch: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_remove: AtomicBool,
    pub echo_email: Mutex<Option<String>>,
    pub hold_first_create: AtomicBool,
    pub create_started: Notify,
    pub release_create: Notify,
}

impl FakeDirectory {
    pub fn with_users(users: Vec<UserRecord>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(users),
            ..Self::default()
        })
    }

    pub fn fail(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(DirectoryError::network("HTTP 503"));
        }
        Ok(self.users.lock().clone())
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord, DirectoryError> {
        if self.hold_first_create.swap(false, Ordering::SeqCst) {
            self.create_started.notify_one();
            self.release_create.notified().await;
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DirectoryError::network("connection refused"));
        }
        self.created.lock().push(record.clone());
        let mut echo = record.clone();
        if let Some(email) = self.echo_email.lock().clone() {
            echo.email = email;
        }
        Ok(echo)
    }

    async fn remove(&self, id: u64) -> Result<(), DirectoryError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(DirectoryError::network("HTTP 500"));
        }
        self.removed.lock().push(id);
        Ok(())
    }
}

/// Keeps every rendered table.
#[derive(Default)]
pub struct RecordingView {
    pub renders: Mutex<Vec<Vec<TableRow>>>,
}

impl RecordingView {
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    pub fn last(&self) -> Vec<TableRow> {
        self.renders.lock().last().cloned().unwrap_or_default()
    }
}

impl TableView for RecordingView {
    fn render(&self, rows: &[TableRow]) {
        self.renders.lock().push(rows.to_vec());
    }
}

/// Answers prompts from a queue, declining once it runs dry.
#[derive(Default)]
pub struct ScriptedConfirm {
    pub answers: Mutex<VecDeque<bool>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::default(),
        })
    }
}

#[async_trait]
impl ConfirmPrompt for ScriptedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        self.asked.lock().push(message.to_owned());
        self.answers.lock().pop_front().unwrap_or(false)
    }
}

pub struct Harness {
    pub controller: DirectoryController,
    pub remote: Arc<FakeDirectory>,
    pub view: Arc<RecordingView>,
    pub confirm: Arc<ScriptedConfirm>,
}

pub fn harness(users: Vec<UserRecord>, answers: &[bool]) -> Harness {
    let remote = FakeDirectory::with_users(users);
    let view = Arc::new(RecordingView::default());
    let confirm = ScriptedConfirm::answering(answers);
    let controller = DirectoryController::new(remote.clone(), view.clone(), confirm.clone());
    Harness {
        controller,
        remote,
        view,
        confirm,
    }
}

impl Harness {
    /// Open the add form and return the id it shows.
    pub fn open_add(&self) -> u64 {
        self.controller.open_for_add().id.unwrap()
    }
}
