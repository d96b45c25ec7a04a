//! Domain Layer - Core Entity Traits
//!
//! Every row type has a unique id; the [`Record`] trait ties a row type to
//! its remote collection so the sync layer can stay generic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::collection::Collection;
use crate::error::ValidationError;

/// Server-assigned row identifier
pub type RowId = i64;

/// Core trait for all domain entities
pub trait Entity: Sized + Clone + 'static {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// A row stored in one of the remote collections
pub trait Record: Entity<Id = RowId> + DeserializeOwned {
    const COLLECTION: Collection;
    /// Lowercase singular name used in user-facing messages
    const NOUN: &'static str;
    /// Success notice after a delete
    const DELETED: &'static str;
    /// Column the default listing is ordered by
    const ORDER_BY: &'static str;
    const ASCENDING: bool;

    /// Insert payload for this record
    type Draft: Draft;
}

/// An insert payload that can be checked before anything is sent
pub trait Draft: Serialize {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Rows with a two-state completion flag
pub trait Completable {
    fn completed(&self) -> bool;
    fn set_completed(&mut self, completed: bool);
}

/// Rows with an editable name and description
pub trait Describable {
    fn details(&self) -> Details;
    fn set_details(&mut self, details: Details);
}

/// Name/description pair, also the patch body for edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub name: String,
    pub description: String,
}

impl Details {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("Name cannot be empty."));
        }
        Ok(())
    }
}

/// Patch body for completion toggles
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Completion {
    pub completed: bool,
}
