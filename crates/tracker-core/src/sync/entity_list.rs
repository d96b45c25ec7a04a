//! Generic entity list
//!
//! One view model for every collection: list, create, delete, plus toggle
//! and edit for rows that support them. Subjects, topics and products all
//! go through this type.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::confirm::DeleteTicket;
use super::optimistic::mutate;
use super::Notifier;
use crate::domain::{capitalize, Completable, Completion, Describable, Details, Draft, Notice, Record, RowId};
use crate::error::{StoreError, TrackerError, TrackerResult};
use crate::repository::{Query, Repository, SharedStore, Table};

type Observer<T> = Rc<dyn Fn(&[T])>;

pub struct EntityList<T: Record> {
    table: Table<T>,
    scope: RefCell<Query>,
    /// Bumped on every scope change; refreshes issued for an older scope
    /// are discarded
    generation: Cell<u64>,
    items: RefCell<Vec<T>>,
    loading: Cell<bool>,
    observer: RefCell<Option<Observer<T>>>,
    notifier: Notifier,
}

impl<T: Record> EntityList<T> {
    pub fn new(store: SharedStore, notifier: Notifier) -> Self {
        Self {
            table: Table::new(store),
            scope: RefCell::new(Query::for_record::<T>()),
            generation: Cell::new(0),
            items: RefCell::new(Vec::new()),
            loading: Cell::new(false),
            observer: RefCell::new(None),
            notifier,
        }
    }

    /// Replaces the query used by [`refresh`](Self::refresh)
    pub fn set_scope(&self, query: Query) {
        *self.scope.borrow_mut() = query;
        self.generation.set(self.generation.get() + 1);
    }

    /// Called with the full list after every local change
    pub fn observe(&self, observer: impl Fn(&[T]) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn items(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn get(&self, id: RowId) -> Option<T> {
        self.items.borrow().iter().find(|item| item.id() == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub(crate) fn notify(&self, notice: Notice) {
        (self.notifier)(notice);
    }

    fn publish(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            let snapshot = self.items.borrow().clone();
            observer(&snapshot);
        }
    }

    fn fail(&self, err: StoreError, message: String) -> TrackerError {
        log::error!("{} ({})", message, err);
        self.notify(Notice::store_failure(&err, message));
        err.into()
    }

    /// Re-fetches the scoped rows and replaces the local list
    pub async fn refresh(&self) -> TrackerResult<()> {
        let query = self.scope.borrow().clone();
        let generation = self.generation.get();
        self.loading.set(true);
        let result = self.table.list(&query).await;
        if self.generation.get() != generation {
            log::debug!("dropping {} rows fetched for a previous scope", T::NOUN);
            return Ok(());
        }
        self.loading.set(false);
        match result {
            Ok(rows) => {
                log::debug!("loaded {} {}s", rows.len(), T::NOUN);
                *self.items.borrow_mut() = rows;
                self.publish();
                Ok(())
            }
            Err(err) => Err(self.fail(err, format!("Failed to load {}s.", T::NOUN))),
        }
    }

    /// Validates, inserts and refreshes
    pub async fn create(&self, draft: T::Draft) -> TrackerResult<()> {
        if let Err(invalid) = draft.validate() {
            self.notify(Notice::warning(invalid.message.clone()));
            return Err(invalid.into());
        }
        if let Err(err) = self.table.create(&draft).await {
            return Err(self.fail(err, format!("Failed to add {}.", T::NOUN)));
        }
        self.notify(Notice::success(format!("{} added successfully.", capitalize(T::NOUN))));
        self.refresh().await
    }

    /// Deletes a confirmed row and refreshes once
    pub async fn delete(&self, ticket: DeleteTicket<T>) -> TrackerResult<()> {
        if let Err(err) = self.table.delete(ticket.id()).await {
            return Err(self.fail(err, format!("Failed to delete {}.", T::NOUN)));
        }
        self.notify(Notice::success(T::DELETED));
        self.refresh().await
    }

    /// Asks `confirm` first; a declined prompt sends nothing
    pub async fn delete_with_prompt(&self, id: RowId, confirm: impl FnOnce(&str) -> bool) -> TrackerResult<()> {
        match DeleteTicket::prompt(id, confirm) {
            Some(ticket) => self.delete(ticket).await,
            None => Err(TrackerError::Cancelled),
        }
    }

    /// Applies `change` to the local row, returning the previous version
    fn replace_local(&self, id: RowId, change: impl FnOnce(&mut T)) -> Option<T> {
        let previous = {
            let mut items = self.items.borrow_mut();
            let item = items.iter_mut().find(|item| item.id() == id)?;
            let previous = item.clone();
            change(item);
            previous
        };
        self.publish();
        Some(previous)
    }

    /// Puts a previous version back if the row is still listed
    fn restore(&self, previous: Option<T>) {
        let Some(previous) = previous else { return };
        let restored = {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|item| item.id() == previous.id()) {
                Some(item) => {
                    *item = previous;
                    true
                }
                None => false,
            }
        };
        if restored {
            self.publish();
        }
    }

    fn require(&self, id: RowId) -> TrackerResult<T> {
        self.get(id)
            .ok_or_else(|| StoreError::NotFound(format!("{} #{}", T::NOUN, id)).into())
    }
}

impl<T: Record + Completable> EntityList<T> {
    /// Flips the completion flag optimistically; reverts it if the update
    /// fails. Returns the new flag.
    pub async fn toggle(&self, id: RowId) -> TrackerResult<bool> {
        let next = !self.require(id)?.completed();
        let patch = Completion { completed: next };
        let result = mutate(
            || self.replace_local(id, |item| item.set_completed(next)),
            || self.table.update(id, &patch),
            |previous| self.restore(previous),
        )
        .await;

        match result {
            Ok(()) => {
                self.notify(Notice::success(format!("{} status updated!", capitalize(T::NOUN))));
                Ok(next)
            }
            Err(err) => Err(self.fail(err, format!("Failed to update {}.", T::NOUN))),
        }
    }
}

impl<T: Record + Describable> EntityList<T> {
    /// Edits name and description optimistically; restores both if the
    /// update fails, refreshes once if it succeeds.
    pub async fn edit(&self, id: RowId, details: Details) -> TrackerResult<()> {
        let details = Details::new(details.name.trim(), details.description.trim());
        if let Err(invalid) = details.validate() {
            self.notify(Notice::warning(invalid.message.clone()));
            return Err(invalid.into());
        }
        self.require(id)?;

        let local = details.clone();
        let result = mutate(
            || self.replace_local(id, move |item| item.set_details(local)),
            || self.table.update(id, &details),
            |previous| self.restore(previous),
        )
        .await;

        match result {
            Ok(()) => {
                self.notify(Notice::success(format!("{} updated successfully!", capitalize(T::NOUN))));
                self.refresh().await
            }
            Err(err) => Err(self.fail(err, "Failed to save changes.".to_string())),
        }
    }
}

/// Splits rows into (pending, completed), keeping their order
pub fn partition_by_completion<T: Completable + Clone>(items: &[T]) -> (Vec<T>, Vec<T>) {
    let (completed, pending): (Vec<T>, Vec<T>) = items.iter().cloned().partition(|item| item.completed());
    (pending, completed)
}
