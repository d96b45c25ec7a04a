//! Alert Banner Component
//!
//! Shows the current transient notice.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn AlertBanner() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.notice.get().map(|notice| {
            view! {
                <div class=format!("alert alert-{}", notice.level.as_str()) role="alert">
                    <span>{notice.message}</span>
                    <button class="alert-close" on:click=move |_| ctx.dismiss()>"×"</button>
                </div>
            }
        })
    }
}
