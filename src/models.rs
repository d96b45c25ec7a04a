//! Frontend Models
//!
//! Row types come from tracker-core; the UI adds its own screen enum.

pub use tracker_core::dashboard::{RefreshStatus, SubjectSummary};
pub use tracker_core::domain::{Notice, NoticeLevel, Product, RowId, Subject, Topic};

/// Top-level screens reachable from the navbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Study,
    Exams,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Study => "Study Tracker",
            Screen::Exams => "Exam Plan",
        }
    }
}
