//! Vote Board Component
//!
//! The voting view: header, sync status and one column per item, ordered
//! by id or by votes when the leaderboard is on.

use leptos::prelude::*;

use vote_store::tally;

use crate::components::{BoardHeader, SyncStatus, VoteColumn};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn VoteBoard() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let min_scale = ctx.config.min_scale;

    let scale = Memo::new(move |_| store.items().with(|items| tally::bar_scale(items, min_scale)));
    let ordered_ids = Memo::new(move |_| {
        let leaderboard = store.leaderboard().get();
        store.items().with(|items| {
            if leaderboard {
                tally::leaderboard(items).iter().map(|i| i.id).collect::<Vec<_>>()
            } else {
                items.iter().map(|i| i.id).collect()
            }
        })
    });
    let total = Memo::new(move |_| store.items().with(|items| tally::total_votes(items)));

    let background = ctx
        .config
        .background
        .clone()
        .map(|src| format!("background-image: url('{}')", src))
        .unwrap_or_default();

    view! {
        <div class="vote-board" style=background>
            <BoardHeader />
            <SyncStatus />
            <Show
                when=move || store.loaded().get()
                fallback=|| view! { <p class="loading">"Loading..."</p> }
            >
                <div class="vote-columns">
                    <For
                        each=move || ordered_ids.get()
                        key=|id| *id
                        children=move |id| view! { <VoteColumn item_id=id scale=scale /> }
                    />
                </div>
                <p class="vote-total">{move || format!("{} votes", total.get())}</p>
            </Show>
        </div>
    }
}
