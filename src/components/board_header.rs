//! Board Header Component
//!
//! Title, check-in count, the countdown clock and the board actions.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use vote_store::countdown::Countdown;

use crate::components::ResetVotesButton;
use crate::context::use_app_context;
use crate::store::{store_toggle_leaderboard, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardHeader() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let config = ctx.config;

    let countdown = RwSignal::new(Countdown::new(config.countdown_seconds));
    spawn_local(async move {
        loop {
            TimeoutFuture::new(1_000).await;
            // Stops once the header is unmounted or the clock hits zero
            match countdown.try_update(|c| {
                *c = c.tick();
                c.is_finished()
            }) {
                Some(false) => continue,
                _ => break,
            }
        }
    });

    view! {
        <header class="board-header">
            <div class="board-title">
                <h1>{config.title.clone()}</h1>
                <span class="check-in">{format!("{} checked in", config.check_in_count)}</span>
            </div>
            <div
                class="countdown"
                class:finished=move || countdown.get().is_finished()
            >
                {move || countdown.get().to_string()}
            </div>
            <div class="board-actions">
                <button
                    class="leaderboard-btn"
                    class:active=move || store.leaderboard().get()
                    on:click=move |_| store_toggle_leaderboard(&store)
                >
                    "Leaderboard"
                </button>
                <ResetVotesButton />
                <A href="/admin" attr:class="admin-link">"Admin"</A>
            </div>
        </header>
    }
}
