//! Repository Layer
//!
//! The remote store collaborator and its implementations.

mod change;
mod memory;
mod query;
pub mod realtime;
mod rest;
mod traits;

pub use change::{Binding, ChangeCallback, ChangeEvent, ChangeFeed, ChangeKind, EventFilter, SharedFeed};
pub use memory::MemoryStore;
pub use query::{Filter, Order, Query};
pub use rest::RestStore;
pub use traits::{RemoteStore, Repository, SharedStore, StoreResult, Table};
