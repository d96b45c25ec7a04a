//! Topic Card Component
//!
//! Completion toggle, edit modal and delete for one topic.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{browser_confirm, DetailsEditor};
use crate::context::use_app_context;
use crate::models::Topic;

#[component]
pub fn TopicCard(topic: Topic) -> impl IntoView {
    let ctx = use_app_context();
    let id = topic.id;
    let completed = topic.completed;

    let (busy, set_busy) = signal(false);
    let (editing, set_editing) = signal(false);

    let toggle = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.services().topics.toggle(id).await.map(|_| ());
            ctx.report("toggle topic", result);
            set_busy.try_set(false);
        });
    };

    let delete = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.services().topics.delete(id, browser_confirm).await;
            ctx.report("delete topic", result);
            set_busy.try_set(false);
        });
    };

    let save = move |(name, description): (String, String)| {
        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.services().topics.edit(id, &name, &description).await;
            ctx.report("edit topic", result);
            set_busy.try_set(false);
            set_editing.try_set(false);
        });
    };

    let name = topic.name.clone();
    let description = topic.description.clone();

    view! {
        <div class="card topic-card">
            <div class="card-body">
                <h5 class="card-title">
                    {if completed {
                        view! { <span class="text-success">"✔ "</span><strong>{topic.name.clone()}</strong> }.into_any()
                    } else {
                        view! { <span class="text-warning">"✖ "</span><span>{topic.name.clone()}</span> }.into_any()
                    }}
                </h5>
                <p class="card-text">{topic.description.clone()}</p>
                <div class="card-actions">
                    <button
                        class=if completed { "btn btn-success" } else { "btn btn-warning" }
                        disabled=move || busy.get()
                        on:click=toggle
                    >
                        {move || if busy.get() {
                            "…"
                        } else if completed {
                            "Mark Incomplete"
                        } else {
                            "Mark Complete"
                        }}
                    </button>
                    <div>
                        <button
                            class="btn btn-info me-2"
                            title="Edit Topic"
                            disabled=move || busy.get()
                            on:click=move |_| set_editing.set(true)
                        >
                            "✎"
                        </button>
                        <button class="btn btn-danger" disabled=move || busy.get() on:click=delete>
                            "🗑"
                        </button>
                    </div>
                </div>
            </div>
        </div>

        <Show when=move || editing.get()>
            <DetailsEditor
                title="Edit Topic"
                name_label="Topic Name"
                name=name.clone()
                description=description.clone()
                on_save=save
                on_cancel=move |_| set_editing.set(false)
            />
        </Show>
    }
}
