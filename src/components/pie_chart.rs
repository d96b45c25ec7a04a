//! Pie Chart Component
//!
//! Completed/pending pie drawn as inline SVG, with a legend.

use leptos::prelude::*;
use tracker_core::dashboard::{pie_slices, COMPLETED_FILL, PENDING_FILL};

use crate::models::SubjectSummary;

const RADIUS: f64 = 100.0;

#[component]
pub fn PieChart(summary: SubjectSummary) -> impl IntoView {
    let slices = pie_slices(&summary, RADIUS);
    let size = (RADIUS * 2.0).to_string();

    view! {
        <figure class="pie-chart">
            <svg
                width=size.clone()
                height=size.clone()
                viewBox=format!("0 0 {} {}", size, size)
                role="img"
            >
                {slices.into_iter().map(|slice| view! {
                    <path d=slice.path fill=slice.fill>
                        <title>{format!("{}: {}", slice.label, slice.value)}</title>
                    </path>
                }).collect_view()}
            </svg>
            <figcaption class="pie-legend">
                <span class="legend-item" style=format!("color: {}", COMPLETED_FILL)>"■ Completed"</span>
                <span class="legend-item" style=format!("color: {}", PENDING_FILL)>"■ Pending"</span>
            </figcaption>
        </figure>
    }
}
