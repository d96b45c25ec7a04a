//! Product Entity
//!
//! Flat task rows for the exam-plan screen. Same shape as a topic without
//! the subject link or timestamp.

use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::entity::{Completable, Describable, Details, Draft, Entity, Record, RowId};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Entity for Product {
    type Id = RowId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Product {
    const COLLECTION: Collection = Collection::Products;
    const NOUN: &'static str = "product";
    const DELETED: &'static str = "Product deleted successfully!";
    const ORDER_BY: &'static str = "completed";
    const ASCENDING: bool = true;

    type Draft = NewProduct;
}

impl Completable for Product {
    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl Describable for Product {
    fn details(&self) -> Details {
        Details::new(self.name.clone(), self.description.clone())
    }

    fn set_details(&mut self, details: Details) {
        self.name = details.name;
        self.description = details.description;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub completed: bool,
}

impl NewProduct {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            completed: false,
        }
    }
}

impl Draft for NewProduct {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ValidationError::new("Please fill in both Subject and Description."));
        }
        Ok(())
    }
}
