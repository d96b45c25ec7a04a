//! Test support: call recording, failure injection, notice capture and a
//! manually drained spawner.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::domain::{Collection, Notice, RowId};
use crate::error::StoreError;
use crate::lifecycle::Subscription;
use crate::repository::{Binding, ChangeCallback, ChangeFeed, MemoryStore, Query, RemoteStore, StoreResult};
use crate::sync::Notifier;
use crate::timer::{LocalTask, Spawn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Select,
    Insert,
    Update,
    Delete,
}

/// [`MemoryStore`] wrapper that counts calls and fails on request
pub struct RecordingStore {
    inner: MemoryStore,
    calls: RefCell<HashMap<StoreOp, usize>>,
    failures: RefCell<HashMap<StoreOp, VecDeque<StoreError>>>,
    gates: RefCell<VecDeque<Rc<Notify>>>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            gates: RefCell::new(VecDeque::new()),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls.borrow().get(&op).copied().unwrap_or(0)
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// The next `op` call fails with a remote error
    pub fn fail_next(&self, op: StoreOp) {
        self.fail_next_with(
            op,
            StoreError::Remote {
                status: 500,
                message: "injected failure".to_string(),
            },
        );
    }

    pub fn fail_next_with(&self, op: StoreOp, err: StoreError) {
        self.failures.borrow_mut().entry(op).or_default().push_back(err);
    }

    /// The next select waits until the returned gate is notified
    pub fn hold_next_select(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.gates.borrow_mut().push_back(gate.clone());
        gate
    }

    fn record(&self, op: StoreOp) -> StoreResult<()> {
        *self.calls.borrow_mut().entry(op).or_insert(0) += 1;
        match self.failures.borrow_mut().get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl RemoteStore for RecordingStore {
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Value>> {
        self.record(StoreOp::Select)?;
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.inner.select(collection, query).await
    }

    async fn insert(&self, collection: Collection, row: Value) -> StoreResult<Value> {
        self.record(StoreOp::Insert)?;
        self.inner.insert(collection, row).await
    }

    async fn update(&self, collection: Collection, id: RowId, patch: Value) -> StoreResult<()> {
        self.record(StoreOp::Update)?;
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: RowId) -> StoreResult<()> {
        self.record(StoreOp::Delete)?;
        self.inner.delete(collection, id).await
    }
}

impl ChangeFeed for RecordingStore {
    fn subscribe(&self, channel: &str, bindings: Vec<Binding>, callback: ChangeCallback) -> Subscription {
        self.inner.subscribe(channel, bindings, callback)
    }
}

/// Collects notices for assertions
#[derive(Clone, Default)]
pub struct NoticeLog {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl NoticeLog {
    pub fn notifier(&self) -> Notifier {
        let notices = self.notices.clone();
        Rc::new(move |notice| notices.borrow_mut().push(notice))
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    pub fn all(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

/// Spawner whose tasks run only when [`QueueSpawner::drain`] is awaited
#[derive(Clone, Default)]
pub struct QueueSpawner {
    tasks: Rc<RefCell<VecDeque<LocalTask>>>,
}

impl QueueSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs queued tasks to completion, including ones they spawn
    pub async fn drain(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}

impl Spawn for QueueSpawner {
    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}
