//! Confirm Modal Component
//!
//! Modal dialog with cancel/confirm actions.

use leptos::prelude::*;

/// # Arguments
/// * `show` - Whether the modal is open
/// * `on_confirm` - Runs when the destructive action is confirmed
/// * `on_cancel` - Runs on cancel or backdrop click
#[component]
pub fn ConfirmModal(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into, default = "Delete".to_string())] confirm_label: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || show.get()>
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
                <div class="modal-dialog" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h5 class="modal-title">{title.clone()}</h5>
                        <button class="modal-close" on:click=move |_| on_cancel.run(())>"×"</button>
                    </div>
                    <div class="modal-body">{move || message.get()}</div>
                    <div class="modal-footer">
                        <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                        <button class="btn btn-danger" on:click=move |_| on_confirm.run(())>
                            {confirm_label.clone()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
