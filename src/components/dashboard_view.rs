//! Dashboard View Component
//!
//! Mounts the auto-refreshing dashboard for as long as the component lives
//! and renders one card per subject.

use std::rc::Rc;

use leptos::prelude::*;
use tracker_core::dashboard::{Dashboard, DashboardSink};

use super::PieChart;
use crate::models::{RefreshStatus, SubjectSummary};
use crate::store::{
    store_dashboard_error, store_dashboard_loading, store_dashboard_status, store_pause_secs,
    store_set_dashboard_error, store_set_dashboard_loading, store_set_dashboard_status, store_set_summaries,
    store_summaries, use_app_store, AppStore,
};
use crate::context::use_app_context;

/// Writes dashboard updates into the app store
struct StoreSink {
    store: AppStore,
}

impl DashboardSink for StoreSink {
    fn loading(&self, loading: bool) {
        store_set_dashboard_loading(&self.store, loading);
    }

    fn summaries(&self, summaries: &[SubjectSummary]) {
        store_set_summaries(&self.store, summaries);
    }

    fn error(&self, message: Option<&str>) {
        store_set_dashboard_error(&self.store, message.map(str::to_string));
    }

    fn status(&self, status: RefreshStatus) {
        store_set_dashboard_status(&self.store, status);
    }
}

fn pause_label(pause_secs: u32) -> String {
    if pause_secs % 60 == 0 {
        format!("⏸️ Pause for {} Min", pause_secs / 60)
    } else {
        format!("⏸️ Pause for {}s", pause_secs)
    }
}

#[component]
fn SubjectProgressCard(summary: SubjectSummary) -> impl IntoView {
    let completed_width = format!("width: {:.1}%", summary.completed_share() * 100.0);
    let pending_width = format!("width: {:.1}%", summary.pending_share() * 100.0);

    view! {
        <div class="card dashboard-card" style=format!("border-top: 4px solid {}", summary.color)>
            <div class="card-body">
                <h5 class="card-title text-center">{summary.name.clone()}</h5>

                <div class="progress">
                    <div class="progress-bar bg-success" style=completed_width>
                        {format!("✅ {} Completed", summary.completed)}
                    </div>
                    <div class="progress-bar bg-warning" style=pending_width>
                        {format!("⚠️ {} Pending", summary.pending)}
                    </div>
                </div>
                <p class="completion-rate">{format!("{:.1}% complete", summary.completion_rate)}</p>

                <div class="alert alert-info text-center">{summary.message.clone()}</div>

                <PieChart summary=summary.clone() />
            </div>
        </div>
    }
}

#[component]
pub fn DashboardView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let services = ctx.services();
    let handle = Dashboard::mount(
        services.store.clone(),
        services.feed.as_ref(),
        services.timers.clone(),
        services.spawner.clone(),
        services.config.dashboard,
        Rc::new(StoreSink { store }),
    );
    let handle = StoredValue::new_local(Some(handle));
    on_cleanup(move || {
        // Dropping the handle cancels both timers and the subscription
        handle.try_update_value(|h| h.take());
    });

    let is_paused = move || matches!(store_dashboard_status(&store), RefreshStatus::Paused { .. });
    let toggle_pause = move |_| {
        handle.with_value(|h| {
            if let Some(h) = h {
                if h.status() == RefreshStatus::Running {
                    h.pause();
                } else {
                    h.resume();
                }
            }
        });
    };

    view! {
        <section class="dashboard">
            <h2 class="text-center">"Dashboard with Smart Auto-Resume"</h2>

            <div class="dashboard-controls">
                <button
                    class=move || if is_paused() { "btn btn-success" } else { "btn btn-warning" }
                    on:click=toggle_pause
                >
                    {move || if is_paused() { "▶️ Resume Now".to_string() } else { pause_label(store_pause_secs(&store)) }}
                </button>
                {move || match store_dashboard_status(&store) {
                    RefreshStatus::Paused { seconds_left } => Some(view! {
                        <span class="badge bg-info">{format!("Auto-resuming in {}s...", seconds_left)}</span>
                    }),
                    _ => None,
                }}
            </div>

            {move || store_dashboard_error(&store).map(|error| view! {
                <div class="alert alert-danger">{error}</div>
            })}

            <Show
                when=move || !store_dashboard_loading(&store)
                fallback=|| view! {
                    <div class="loading">
                        <div class="spinner" role="status"></div>
                        <p>"Loading data..."</p>
                    </div>
                }
            >
                <div class="row">
                    {move || {
                        let summaries = store_summaries(&store);
                        if summaries.is_empty() {
                            view! { <p class="text-center">"No subjects found"</p> }.into_any()
                        } else {
                            summaries.into_iter()
                                .map(|summary| view! { <SubjectProgressCard summary=summary /> })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </Show>
        </section>
    }
}
