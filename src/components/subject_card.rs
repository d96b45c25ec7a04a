//! Subject Card Component

use leptos::prelude::*;

use crate::models::Subject;

#[component]
pub fn SubjectCard(
    subject: Subject,
    #[prop(into)] selected: Signal<bool>,
    #[prop(into)] on_view: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    view! {
        <div class=move || if selected.get() { "card subject-card selected" } else { "card subject-card" }>
            <div class="card-body">
                <h5 class="card-title">{subject.name}</h5>
                <button class="btn btn-info" on:click=move |_| on_view.run(())>
                    "View & Add Topics"
                </button>
                <button class="btn btn-danger ms-2" on:click=move |_| on_delete.run(())>
                    "Delete"
                </button>
            </div>
        </div>
    }
}
