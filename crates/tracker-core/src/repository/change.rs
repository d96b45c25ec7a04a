//! Push notifications for row changes

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::domain::{Collection, RowId};
use crate::lifecycle::Subscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Insert => "INSERT",
            ChangeKind::Update => "UPDATE",
            ChangeKind::Delete => "DELETE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "INSERT" => Some(ChangeKind::Insert),
            "UPDATE" => Some(ChangeKind::Update),
            "DELETE" => Some(ChangeKind::Delete),
            _ => None,
        }
    }
}

/// Which change kinds a binding wants (`*` for all)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    All,
    Only(ChangeKind),
}

impl EventFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventFilter::All => "*",
            EventFilter::Only(kind) => kind.as_str(),
        }
    }

    pub fn accepts(&self, kind: ChangeKind) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(wanted) => *wanted == kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    pub record_id: Option<RowId>,
}

/// One (collection, event filter) pair of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub collection: Collection,
    pub filter: EventFilter,
}

impl Binding {
    pub fn all(collection: Collection) -> Self {
        Self {
            collection,
            filter: EventFilter::All,
        }
    }

    pub fn matches(&self, event: &ChangeEvent) -> bool {
        self.collection == event.collection && self.filter.accepts(event.kind)
    }
}

pub type ChangeCallback = Rc<dyn Fn(&ChangeEvent)>;

/// Push-subscription primitive of the remote store
pub trait ChangeFeed {
    /// Registers `callback` for events matching any of `bindings` on the
    /// named channel. Dropping the returned handle unsubscribes.
    fn subscribe(&self, channel: &str, bindings: Vec<Binding>, callback: ChangeCallback) -> Subscription;
}

pub type SharedFeed = Rc<dyn ChangeFeed>;
