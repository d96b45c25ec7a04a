//! Subject Entity
//!
//! A named group of topics. Never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::entity::{Draft, Entity, Record, RowId};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: RowId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Subject {
    type Id = RowId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Subject {
    const COLLECTION: Collection = Collection::Subjects;
    const NOUN: &'static str = "subject";
    const DELETED: &'static str = "Subject deleted successfully.";
    const ORDER_BY: &'static str = "created_at";
    const ASCENDING: bool = false;

    type Draft = NewSubject;
}

/// Insert payload for a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubject {
    pub name: String,
}

impl NewSubject {
    /// Builds a draft from raw form input, trimming surrounding whitespace
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }
}

impl Draft for NewSubject {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("Subject name cannot be empty."));
        }
        Ok(())
    }
}
