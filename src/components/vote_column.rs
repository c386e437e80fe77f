//! Vote Column Component
//!
//! One candidate: vote count, bar, picture and the vote button.

use leptos::prelude::*;

use vote_store::tally;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn VoteColumn(item_id: u32, #[prop(into)] scale: Signal<u32>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let item = Memo::new(move |_| {
        store
            .items()
            .with(|items| items.iter().find(|i| i.id == item_id).cloned())
    });
    let votes = move || item.get().map(|i| i.votes).unwrap_or(0);
    let name = move || item.get().map(|i| i.name).unwrap_or_default();

    view! {
        <div class="vote-column">
            <div class="vote-count">{votes}</div>
            <div class="bar-track">
                <div
                    class="bar"
                    class:empty=move || votes() == 0
                    style:height=move || format!("{:.1}%", tally::bar_percent(votes(), scale.get()))
                ></div>
            </div>
            {move || match item.get().and_then(|i| i.image) {
                Some(src) => view! { <img class="item-image" src=src alt=name() /> }.into_any(),
                None => view! { <div class="item-image placeholder">"IMG"</div> }.into_any(),
            }}
            <button
                class="vote-btn"
                disabled=move || !store.loaded().get()
                on:click=move |_| commands::vote(store, ctx, item_id)
            >
                {name}
            </button>
        </div>
    }
}
