//! Product Card Component
//!
//! One exam-plan entry: completion toggle, inline edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_core::domain::Details;

use super::{browser_confirm, DetailsEditor};
use crate::context::use_app_context;
use crate::models::Product;

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let ctx = use_app_context();
    let id = product.id;
    let completed = product.completed;
    let (editing, set_editing) = signal(false);

    let toggle = move |_| {
        spawn_local(async move {
            let result = ctx.services().products.toggle(id).await.map(|_| ());
            ctx.report("toggle product", result);
        });
    };

    let delete = move |_| {
        spawn_local(async move {
            let result = ctx.services().products.delete_with_prompt(id, browser_confirm).await;
            ctx.report("delete product", result);
        });
    };

    let save = move |(name, description): (String, String)| {
        spawn_local(async move {
            let result = ctx.services().products.edit(id, Details::new(name, description)).await;
            ctx.report("edit product", result);
            set_editing.try_set(false);
        });
    };

    let name = product.name.clone();
    let description = product.description.clone();

    view! {
        <div class="card product-card">
            <div class="card-body">
                <h5 class="card-title">{product.name.clone()}</h5>
                <p class="card-text">{product.description.clone()}</p>
                <div class="card-actions">
                    <button class=if completed { "btn btn-success" } else { "btn btn-warning" } on:click=toggle>
                        {if completed { "Completed" } else { "Mark as Completed" }}
                    </button>
                    <button class="btn btn-danger" on:click=delete>"Delete"</button>
                    <button class="btn btn-secondary" on:click=move |_| set_editing.set(true)>"Edit"</button>
                </div>
            </div>
        </div>

        <Show when=move || editing.get()>
            <DetailsEditor
                title="Edit Product"
                name_label="Product Name"
                name=name.clone()
                description=description.clone()
                on_save=save
                on_cancel=move |_| set_editing.set(false)
            />
        </Show>
    }
}
