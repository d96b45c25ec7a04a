//! Study Tracker App
//!
//! Navbar, notice banner and the two screens: study tracking (dashboard,
//! subjects, topics) and the exam plan (dashboard, products).

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::backend::{load_config, Services};
use crate::components::{AlertBanner, DashboardView, ProductBoard, SubjectPanel, TopicPanel};
use crate::context::AppContext;
use crate::models::Screen;
use crate::store::{
    store_screen, store_set_products, store_set_screen, store_set_subjects, store_set_subjects_loading,
    store_set_topics, AppState,
};

#[component]
pub fn App() -> impl IntoView {
    let (config, config_notice) = load_config();
    let store = Store::new(AppState::new(config.dashboard.pause_secs));
    provide_context(store);

    let ctx = AppContext::new(signal(None), config.notice_ttl_ms);
    provide_context(ctx);

    let services = Services::connect(config, ctx.notifier());

    // Mirror view-model lists into the store
    services.subjects.list().observe(move |subjects| store_set_subjects(&store, subjects));
    services.topics.list().observe(move |topics| store_set_topics(&store, topics));
    services.products.observe(move |products| store_set_products(&store, products));
    ctx.install(services);

    if let Some(notice) = config_notice {
        ctx.notify(notice);
    }

    // Initial loads
    spawn_local(async move {
        let services = ctx.services();
        store_set_subjects_loading(&store, true);
        let result = services.subjects.refresh().await;
        store_set_subjects_loading(&store, false);
        ctx.report("load subjects", result);
        ctx.report("load products", services.products.refresh().await);
    });

    view! {
        <nav class="navbar">
            <span class="navbar-brand">"📚 Task Manager"</span>
            <div class="navbar-nav">
                {[Screen::Study, Screen::Exams].into_iter().map(|screen| view! {
                    <button
                        class=move || if store_screen(&store) == screen { "nav-btn active" } else { "nav-btn" }
                        on:click=move |_| store_set_screen(&store, screen)
                    >
                        {screen.label()}
                    </button>
                }).collect_view()}
            </div>
        </nav>

        <main class="container">
            <AlertBanner />

            <DashboardView />

            <hr />

            <Show
                when=move || store_screen(&store) == Screen::Study
                fallback=|| view! { <ProductBoard /> }
            >
                <SubjectPanel />
                <hr />
                <TopicPanel />
            </Show>
        </main>
    }
}
