//! Reset Votes Button Component
//!
//! Inline confirmation before wiping every vote.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::store::use_app_store;

/// Shows "Clear votes" initially. When clicked, asks "Clear all votes?" with ✓/✗.
#[component]
pub fn ResetVotesButton() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (confirming, set_confirming) = signal(false);
    let (busy, set_busy) = signal(false);

    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_busy.set(true);
        spawn_local(async move {
            // Failure is already logged and shown by the sync badge
            let _ = commands::reset_votes(store, ctx).await;
            set_busy.set(false);
            set_confirming.set(false);
        });
    };

    view! {
        <Show when=move || !confirming.get()>
            <button
                class="reset-btn"
                disabled=move || !ctx.storage_ready.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                "Clear votes"
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="reset-confirm">
                <span class="reset-confirm-text">"Clear all votes?"</span>
                <button class="confirm-btn" disabled=move || busy.get() on:click=confirm>
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
