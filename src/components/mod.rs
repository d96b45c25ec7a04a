//! UI Components
//!
//! Reusable Leptos components.

mod alert_banner;
mod confirm_modal;
mod dashboard_view;
mod details_editor;
mod pie_chart;
mod product_board;
mod product_card;
mod subject_card;
mod subject_panel;
mod topic_card;
mod topic_panel;

pub use alert_banner::AlertBanner;
pub use confirm_modal::ConfirmModal;
pub use dashboard_view::DashboardView;
pub use details_editor::DetailsEditor;
pub use pie_chart::PieChart;
pub use product_board::ProductBoard;
pub use product_card::ProductCard;
pub use subject_card::SubjectCard;
pub use subject_panel::SubjectPanel;
pub use topic_card::TopicCard;
pub use topic_panel::TopicPanel;

/// Blocking browser confirmation; a missing window counts as "no"
pub(crate) fn browser_confirm(question: &str) -> bool {
    leptos::prelude::window()
        .confirm_with_message(question)
        .unwrap_or(false)
}
