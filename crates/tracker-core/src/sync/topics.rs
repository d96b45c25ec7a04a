//! Topic board
//!
//! Topics of the currently selected subject.

use std::cell::Cell;

use super::entity_list::EntityList;
use super::Notifier;
use crate::domain::{Details, NewTopic, Notice, Record, RowId, Topic};
use crate::error::{TrackerResult, ValidationError};
use crate::repository::{Query, SharedStore};

pub struct TopicBoard {
    list: EntityList<Topic>,
    selected: Cell<Option<RowId>>,
}

impl TopicBoard {
    pub fn new(store: SharedStore, notifier: Notifier) -> Self {
        Self {
            list: EntityList::new(store, notifier),
            selected: Cell::new(None),
        }
    }

    pub fn list(&self) -> &EntityList<Topic> {
        &self.list
    }

    pub fn topics(&self) -> Vec<Topic> {
        self.list.items()
    }

    pub fn selected(&self) -> Option<RowId> {
        self.selected.get()
    }

    /// Scopes the list to one subject and loads it
    pub async fn select(&self, subject_id: RowId) -> TrackerResult<()> {
        self.selected.set(Some(subject_id));
        self.list
            .set_scope(Query::for_record::<Topic>().eq("subject_id", subject_id));
        self.list.refresh().await
    }

    pub async fn refresh(&self) -> TrackerResult<()> {
        if self.selected.get().is_none() {
            return Ok(());
        }
        self.list.refresh().await
    }

    /// Adds a topic under the selected subject
    pub async fn add(&self, name: &str, description: &str) -> TrackerResult<()> {
        let Some(subject_id) = self.selected.get() else {
            let invalid = ValidationError::new("Please fill in all topic details.");
            self.list.notify(Notice::warning(invalid.message.clone()));
            return Err(invalid.into());
        };
        self.list.create(NewTopic::new(subject_id, name, description)).await
    }

    /// Flips completion, returning the new flag
    pub async fn toggle(&self, id: RowId) -> TrackerResult<bool> {
        self.list.toggle(id).await
    }

    pub async fn edit(&self, id: RowId, name: &str, description: &str) -> TrackerResult<()> {
        self.list.edit(id, Details::new(name, description)).await
    }

    /// `confirm` is shown "Are you sure you want to delete this topic?"
    pub async fn delete(&self, id: RowId, confirm: impl FnOnce(&str) -> bool) -> TrackerResult<()> {
        log::debug!("delete requested for {} #{}", Topic::NOUN, id);
        self.list.delete_with_prompt(id, confirm).await
    }
}
