//! Subject Panel Component
//!
//! New-subject form, the subject cards and the delete confirmation modal.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{ConfirmModal, SubjectCard};
use crate::context::use_app_context;
use crate::models::RowId;
use crate::store::{
    store_select_subject, store_selected_subject, store_set_topic_form_open, store_subjects,
    store_subjects_loading, use_app_store,
};

#[component]
pub fn SubjectPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (new_subject, set_new_subject) = signal(String::new());
    // Name shown in the confirmation modal while a delete is pending
    let (pending_delete, set_pending_delete) = signal::<Option<String>>(None);

    let add_subject = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_subject.get();
        spawn_local(async move {
            let result = ctx.services().subjects.add(&name).await;
            if result.is_ok() {
                set_new_subject.set(String::new());
            }
            ctx.report("add subject", result);
        });
    };

    let view_topics = move |subject_id: RowId| {
        store_select_subject(&store, Some(subject_id));
        store_set_topic_form_open(&store, true);
        spawn_local(async move {
            let result = ctx.services().topics.select(subject_id).await;
            ctx.report("load topics", result);
        });
    };

    let request_delete = move |subject_id: RowId| {
        let services = ctx.services();
        services.subjects.request_delete(subject_id);
        set_pending_delete.set(services.subjects.pending_delete().map(|s| s.name));
    };

    let confirm_delete = move |_| {
        set_pending_delete.set(None);
        spawn_local(async move {
            let result = ctx.services().subjects.confirm_delete().await;
            ctx.report("delete subject", result);
        });
    };

    let cancel_delete = move |_| {
        ctx.services().subjects.cancel_delete();
        set_pending_delete.set(None);
    };

    view! {
        <section class="subjects">
            <h3>"Subjects 📖"</h3>
            <form class="new-subject-form" on:submit=add_subject>
                <label>"New Subject"</label>
                <input
                    type="text"
                    placeholder="Enter subject name"
                    prop:value=move || new_subject.get()
                    on:input=move |ev| set_new_subject.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-success mt-2">"+ Add Subject"</button>
            </form>

            <Show
                when=move || !store_subjects_loading(&store)
                fallback=|| view! { <div class="spinner" role="status"></div> }
            >
                <div class="row">
                    {move || store_subjects(&store).into_iter().map(|subject| {
                        let id = subject.id;
                        view! {
                            <SubjectCard
                                subject=subject
                                selected=Signal::derive(move || store_selected_subject(&store) == Some(id))
                                on_view=move |_| view_topics(id)
                                on_delete=move |_| request_delete(id)
                            />
                        }
                    }).collect_view()}
                </div>
            </Show>

            <ConfirmModal
                show=Signal::derive(move || pending_delete.get().is_some())
                title="Confirm Deletion"
                message=Signal::derive(move || match pending_delete.get() {
                    Some(name) => format!("Are you sure you want to delete the subject \"{}\"?", name),
                    None => String::new(),
                })
                on_confirm=confirm_delete
                on_cancel=cancel_delete
            />
        </section>
    }
}
