//! Repository Layer - Core Traits
//!
//! [`RemoteStore`] is the row-level collaborator (REST or in-memory).
//! [`Repository`] is the typed view over one collection.

use std::marker::PhantomData;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::query::Query;
use crate::domain::{Collection, Record, RowId};
use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Row-oriented CRUD against the named collections
///
/// Futures are `?Send`: the app runs on a single thread.
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Rows matching the query's filters, in the query's order
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Value>>;

    /// Insert one row, returning it as stored (with id and defaults)
    async fn insert(&self, collection: Collection, row: Value) -> StoreResult<Value>;

    /// Merge `patch` into the row with `id`
    async fn update(&self, collection: Collection, id: RowId, patch: Value) -> StoreResult<()>;

    /// Delete the row with `id`
    async fn delete(&self, collection: Collection, id: RowId) -> StoreResult<()>;
}

pub type SharedStore = Rc<dyn RemoteStore>;

/// Typed CRUD for one record type
#[async_trait(?Send)]
pub trait Repository<T: Record> {
    async fn list(&self, query: &Query) -> StoreResult<Vec<T>>;

    async fn create(&self, draft: &T::Draft) -> StoreResult<T>;

    async fn update<P: Serialize + ?Sized>(&self, id: RowId, patch: &P) -> StoreResult<()>;

    async fn delete(&self, id: RowId) -> StoreResult<()>;
}

/// [`Repository`] over any shared store
pub struct Table<T> {
    store: SharedStore,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Table<T> {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

#[async_trait(?Send)]
impl<T: Record> Repository<T> for Table<T> {
    async fn list(&self, query: &Query) -> StoreResult<Vec<T>> {
        let rows = self.store.select(T::COLLECTION, query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    async fn create(&self, draft: &T::Draft) -> StoreResult<T> {
        let row = serde_json::to_value(draft)?;
        let stored = self.store.insert(T::COLLECTION, row).await?;
        Ok(serde_json::from_value(stored)?)
    }

    async fn update<P: Serialize + ?Sized>(&self, id: RowId, patch: &P) -> StoreResult<()> {
        let patch = serde_json::to_value(patch)?;
        self.store.update(T::COLLECTION, id, patch).await
    }

    async fn delete(&self, id: RowId) -> StoreResult<()> {
        self.store.delete(T::COLLECTION, id).await
    }
}
