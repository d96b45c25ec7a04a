//! Sync Layer
//!
//! View models over the remote store: every list keeps a local copy of its
//! rows, mutates it optimistically where that applies, and re-fetches after
//! structural changes.

mod confirm;
mod entity_list;
mod optimistic;
mod refresh_queue;
mod subjects;
mod topics;

use std::rc::Rc;

use crate::domain::Notice;

pub use confirm::{DeleteGate, DeleteTicket};
pub use entity_list::{partition_by_completion, EntityList};
pub use optimistic::mutate;
pub use refresh_queue::RefreshQueue;
pub use subjects::SubjectBoard;
pub use topics::TopicBoard;

/// Sink for transient user-facing messages
pub type Notifier = Rc<dyn Fn(Notice)>;
