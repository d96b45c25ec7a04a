//! Product Board Component
//!
//! Exam-plan screen: create form plus pending and completed lists.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_core::domain::NewProduct;
use tracker_core::sync::partition_by_completion;

use super::ProductCard;
use crate::context::use_app_context;
use crate::store::{store_products, use_app_store};

#[component]
pub fn ProductBoard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let create_product = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = NewProduct::new(&name.get(), &description.get());
        spawn_local(async move {
            let result = ctx.services().products.create(draft).await;
            if result.is_ok() {
                set_name.set(String::new());
                set_description.set(String::new());
            }
            ctx.report("create product", result);
        });
    };

    let partitioned = Memo::new(move |_| partition_by_completion(&store_products(&store)));

    view! {
        <section class="products">
            <h3>"Create a Test Plan"</h3>
            <form class="new-product-form" on:submit=create_product>
                <label>"Subject"</label>
                <input
                    type="text"
                    placeholder="Enter subject"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <label>"Topic Description"</label>
                <textarea
                    rows="3"
                    placeholder="Enter topic description"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>
                <button type="submit" class="btn btn-primary">"Create Topic"</button>
            </form>

            <hr />
            <h3>"Pending Topics"</h3>
            <div class="row">
                {move || partitioned.get().0.into_iter()
                    .map(|product| view! { <ProductCard product=product /> })
                    .collect_view()}
            </div>

            <hr />
            <h3>"Completed Topics ✅"</h3>
            <div class="row">
                {move || partitioned.get().1.into_iter()
                    .map(|product| view! { <ProductCard product=product /> })
                    .collect_view()}
            </div>
        </section>
    }
}
