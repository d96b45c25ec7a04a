//! Study Tracker Core
//!
//! Layered architecture:
//! - domain: Subjects, topics, products and notices
//! - repository: Remote store collaborator (REST, realtime codec, in-memory)
//! - sync: Entity lists with optimistic mutations and refresh coalescing
//! - dashboard: Completion statistics and the auto-refresh controller
//!
//! Everything here is single-threaded (`Rc`, `?Send` futures) so the same
//! code runs inside the browser and under native tests.

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod repository;
pub mod sync;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, DashboardSettings, RemoteConfig, TrackerConfig};
pub use error::{StoreError, TrackerError, TrackerResult, ValidationError};
