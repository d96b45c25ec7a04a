//! Topic Entity
//!
//! A study item belonging to a subject. The subject reference is not
//! enforced: deleting a subject leaves its topics in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::entity::{Completable, Describable, Details, Draft, Entity, Record, RowId};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub subject_id: RowId,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for Topic {
    type Id = RowId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Topic {
    const COLLECTION: Collection = Collection::Topics;
    const NOUN: &'static str = "topic";
    const DELETED: &'static str = "Topic deleted successfully!";
    const ORDER_BY: &'static str = "created_at";
    const ASCENDING: bool = false;

    type Draft = NewTopic;
}

impl Completable for Topic {
    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl Describable for Topic {
    fn details(&self) -> Details {
        Details::new(self.name.clone(), self.description.clone())
    }

    fn set_details(&mut self, details: Details) {
        self.name = details.name;
        self.description = details.description;
    }
}

/// Insert payload for a topic; new topics always start incomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTopic {
    pub name: String,
    pub description: String,
    pub subject_id: RowId,
    pub completed: bool,
}

impl NewTopic {
    pub fn new(subject_id: RowId, name: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            subject_id,
            completed: false,
        }
    }
}

impl Draft for NewTopic {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ValidationError::new("Please fill in all topic details."));
        }
        Ok(())
    }
}
