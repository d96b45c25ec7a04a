//! Dashboard
//!
//! Per-subject completion statistics, kept fresh by a poll timer and push
//! notifications, with a pausable auto-refresh.

mod chart;
mod controller;
mod motivation;
mod stats;
mod view;

pub use chart::{pie_slices, PieSlice, COMPLETED_FILL, PENDING_FILL};
pub use controller::{RefreshController, RefreshStatus};
pub use motivation::Tier;
pub use stats::{completion_rate, summarize, SubjectSummary, PALETTE};
pub use view::{Dashboard, DashboardHandle, DashboardSink, CHANNEL, LOAD_FAILURE};
