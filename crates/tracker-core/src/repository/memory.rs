//! In-memory store
//!
//! Backs the app when no remote endpoint is configured, and the tests.
//! Assigns ids and `created_at` like the hosted store does and publishes a
//! change event for every mutation.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

use super::change::{Binding, ChangeCallback, ChangeEvent, ChangeFeed, ChangeKind};
use super::query::Query;
use super::traits::{RemoteStore, StoreResult};
use crate::domain::{Collection, RowId};
use crate::error::StoreError;
use crate::lifecycle::Subscription;

#[derive(Default)]
struct Tables {
    rows: HashMap<Collection, Vec<Map<String, Value>>>,
    next_id: HashMap<Collection, RowId>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    fn allocate_id(&mut self, collection: Collection) -> RowId {
        let next = self.next_id.entry(collection).or_insert(0);
        *next += 1;
        *next
    }

    /// Strictly increasing so insertion order survives ordering by time
    fn timestamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

struct Listener {
    id: u64,
    bindings: Vec<Binding>,
    callback: ChangeCallback,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RefCell<Tables>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_listener: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self, collection: Collection) -> usize {
        self.tables
            .borrow()
            .rows
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn emit(&self, event: ChangeEvent) {
        // Callbacks may subscribe or unsubscribe, so call them unborrowed.
        let callbacks: Vec<ChangeCallback> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.bindings.iter().any(|b| b.matches(&event)))
            .map(|l| l.callback.clone())
            .collect();
        for callback in callbacks {
            callback(&event);
        }
    }
}

fn row_id(row: &Map<String, Value>) -> Option<RowId> {
    row.get("id").and_then(Value::as_i64)
}

#[async_trait(?Send)]
impl RemoteStore for MemoryStore {
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Value>> {
        let tables = self.tables.borrow();
        let mut rows: Vec<Value> = tables
            .rows
            .get(&collection)
            .into_iter()
            .flatten()
            .map(|row| Value::Object(row.clone()))
            .filter(|row| query.matches(row))
            .collect();
        query.sort(&mut rows);
        Ok(rows)
    }

    async fn insert(&self, collection: Collection, row: Value) -> StoreResult<Value> {
        let Value::Object(mut row) = row else {
            return Err(StoreError::Remote {
                status: 400,
                message: format!("insert into {} expects an object", collection),
            });
        };

        let id = {
            let mut tables = self.tables.borrow_mut();
            let id = tables.allocate_id(collection);
            row.insert("id".to_string(), Value::from(id));
            if collection.has_timestamps() && !row.contains_key("created_at") {
                let created_at = tables.timestamp();
                row.insert("created_at".to_string(), serde_json::to_value(created_at)?);
            }
            tables.rows.entry(collection).or_default().push(row.clone());
            id
        };

        log::debug!("memory store: inserted {}#{}", collection, id);
        self.emit(ChangeEvent {
            collection,
            kind: ChangeKind::Insert,
            record_id: Some(id),
        });
        Ok(Value::Object(row))
    }

    async fn update(&self, collection: Collection, id: RowId, patch: Value) -> StoreResult<()> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::Remote {
                status: 400,
                message: format!("update of {} expects an object", collection),
            });
        };

        let found = {
            let mut tables = self.tables.borrow_mut();
            match tables
                .rows
                .get_mut(&collection)
                .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
            {
                Some(row) => {
                    for (key, value) in patch {
                        if key != "id" {
                            row.insert(key, value);
                        }
                    }
                    true
                }
                None => false,
            }
        };

        // Like the hosted store, updating a missing row is not an error.
        if found {
            self.emit(ChangeEvent {
                collection,
                kind: ChangeKind::Update,
                record_id: Some(id),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: RowId) -> StoreResult<()> {
        let removed = {
            let mut tables = self.tables.borrow_mut();
            let rows = tables.rows.entry(collection).or_default();
            let before = rows.len();
            rows.retain(|row| row_id(row) != Some(id));
            rows.len() != before
        };

        if removed {
            self.emit(ChangeEvent {
                collection,
                kind: ChangeKind::Delete,
                record_id: Some(id),
            });
        }
        Ok(())
    }
}

impl ChangeFeed for MemoryStore {
    fn subscribe(&self, channel: &str, bindings: Vec<Binding>, callback: ChangeCallback) -> Subscription {
        let id = self.next_listener.get() + 1;
        self.next_listener.set(id);
        self.listeners.borrow_mut().push(Listener {
            id,
            bindings,
            callback,
        });
        log::debug!("memory store: channel {} subscribed (listener {})", channel, id);

        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|l| l.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let row = store
            .insert(Collection::Subjects, json!({"name": "Algebra"}))
            .await
            .unwrap();
        assert_eq!(row["id"], 1);
        assert!(row["created_at"].is_string());

        let product = store
            .insert(Collection::Products, json!({"name": "Mock", "description": "", "completed": false}))
            .await
            .unwrap();
        assert_eq!(product["id"], 1);
        assert!(product.get("created_at").is_none());
    }

    #[tokio::test]
    async fn test_select_filters_and_orders_newest_first() {
        let store = MemoryStore::new();
        for (name, subject) in [("a", 1), ("b", 2), ("c", 1)] {
            store
                .insert(Collection::Topics, json!({"name": name, "subject_id": subject, "completed": false}))
                .await
                .unwrap();
        }
        let rows = store
            .select(
                Collection::Topics,
                &Query::all().eq("subject_id", 1).order_by("created_at", false),
            )
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_update_merges_and_delete_removes() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Products, json!({"name": "Mock", "description": "d", "completed": false}))
            .await
            .unwrap();
        store
            .update(Collection::Products, 1, json!({"completed": true}))
            .await
            .unwrap();
        let rows = store.select(Collection::Products, &Query::all()).await.unwrap();
        assert_eq!(rows[0]["completed"], true);
        assert_eq!(rows[0]["name"], "Mock");

        store.delete(Collection::Products, 1).await.unwrap();
        assert_eq!(store.row_count(Collection::Products), 0);
    }

    #[tokio::test]
    async fn test_change_events_reach_matching_subscribers_until_dropped() {
        let store = MemoryStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = store.subscribe(
            "test",
            vec![Binding::all(Collection::Topics)],
            Rc::new(move |event: &ChangeEvent| sink.borrow_mut().push(event.kind)),
        );

        store.insert(Collection::Subjects, json!({"name": "x"})).await.unwrap();
        store
            .insert(Collection::Topics, json!({"name": "t", "subject_id": 1}))
            .await
            .unwrap();
        store.delete(Collection::Topics, 1).await.unwrap();
        assert_eq!(*seen.borrow(), vec![ChangeKind::Insert, ChangeKind::Delete]);

        drop(subscription);
        assert_eq!(store.subscriber_count(), 0);
        store
            .insert(Collection::Topics, json!({"name": "u", "subject_id": 1}))
            .await
            .unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }
}
