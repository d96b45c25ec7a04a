//! Topic Panel Component
//!
//! Topics of the selected subject plus the add-topic modal.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::TopicCard;
use crate::context::use_app_context;
use crate::store::{
    store_selected_subject, store_set_topic_form_open, store_subjects, store_topic_form_open, store_topics,
    use_app_store,
};

#[component]
fn AddTopicModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (topic_name, set_topic_name) = signal(String::new());
    let (topic_description, set_topic_description) = signal(String::new());

    let add_topic = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = topic_name.get();
        let description = topic_description.get();
        spawn_local(async move {
            let result = ctx.services().topics.add(&name, &description).await;
            if result.is_ok() {
                set_topic_name.set(String::new());
                set_topic_description.set(String::new());
                store_set_topic_form_open(&store, false);
            }
            ctx.report("add topic", result);
        });
    };

    let close = move |_| store_set_topic_form_open(&store, false);

    view! {
        <div class="modal-backdrop" on:click=close>
            <div class="modal-dialog" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h5 class="modal-title">"Add Topic"</h5>
                    <button class="modal-close" on:click=close>"×"</button>
                </div>
                <form class="modal-body" on:submit=add_topic>
                    <label>"Topic Name"</label>
                    <input
                        type="text"
                        placeholder="Enter topic name"
                        prop:value=move || topic_name.get()
                        on:input=move |ev| set_topic_name.set(event_target_value(&ev))
                    />
                    <label>"Topic Description"</label>
                    <textarea
                        rows="3"
                        placeholder="Enter topic description"
                        prop:value=move || topic_description.get()
                        on:input=move |ev| set_topic_description.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit" class="btn btn-success">"+ Add Topic"</button>
                </form>
            </div>
        </div>
    }
}

#[component]
pub fn TopicPanel() -> impl IntoView {
    let store = use_app_store();

    let subject_name = move || {
        let selected = store_selected_subject(&store)?;
        store_subjects(&store)
            .into_iter()
            .find(|s| s.id == selected)
            .map(|s| s.name)
    };

    view! {
        <section class="topics">
            <div class="section-header">
                <h3>
                    "Topics"
                    {move || subject_name().map(|name| format!(": {}", name))}
                </h3>
                <Show when=move || store_selected_subject(&store).is_some()>
                    <button class="btn btn-success" on:click=move |_| store_set_topic_form_open(&store, true)>
                        "+ Add Topic"
                    </button>
                </Show>
            </div>

            <div class="row">
                {move || {
                    let topics = store_topics(&store);
                    if topics.is_empty() {
                        view! {
                            <div class="empty-state">
                                <h5 class="text-muted">"No topics found. Start by adding a new topic!"</h5>
                            </div>
                        }.into_any()
                    } else {
                        topics.into_iter()
                            .map(|topic| view! { <TopicCard topic=topic /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>

            <Show when=move || store_topic_form_open(&store)>
                <AddTopicModal />
            </Show>
        </section>
    }
}
