//! Domain Layer
//!
//! Row types for the three remote collections plus the notice type the
//! views surface to users. No I/O happens here.

mod collection;
mod entity;
mod notice;
mod product;
mod subject;
mod topic;

pub use collection::Collection;
pub use entity::{Completable, Describable, Details, Draft, Entity, Record, RowId};
pub use notice::{Notice, NoticeLevel, GENERIC_FAILURE};
pub use product::{NewProduct, Product};
pub use subject::{NewSubject, Subject};
pub use topic::{NewTopic, Topic};

pub(crate) use entity::Completion;
pub(crate) use notice::capitalize;
