//! Details Editor Component
//!
//! Modal form editing a name and a description.

use leptos::prelude::*;

#[component]
pub fn DetailsEditor(
    #[prop(into)] title: String,
    #[prop(into)] name_label: String,
    name: String,
    description: String,
    #[prop(into)] on_save: Callback<(String, String)>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (edited_name, set_edited_name) = signal(name);
    let (edited_description, set_edited_description) = signal(description);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run((edited_name.get(), edited_description.get()));
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="modal-dialog" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h5 class="modal-title">{title}</h5>
                    <button class="modal-close" on:click=move |_| on_cancel.run(())>"×"</button>
                </div>
                <form class="modal-body" on:submit=save>
                    <label>{name_label}</label>
                    <input
                        type="text"
                        prop:value=move || edited_name.get()
                        on:input=move |ev| set_edited_name.set(event_target_value(&ev))
                    />
                    <label>"Description"</label>
                    <textarea
                        rows="3"
                        prop:value=move || edited_description.get()
                        on:input=move |ev| set_edited_description.set(event_target_value(&ev))
                    ></textarea>
                    <div class="modal-footer">
                        <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Save Changes"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
