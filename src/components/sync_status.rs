//! Sync Status Component
//!
//! Non-fatal badge for writes that didn't reach storage, with a Retry
//! that re-persists the whole in-memory board.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SyncStatus() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (retrying, set_retrying) = signal(false);

    let retry = move |_| {
        set_retrying.set(true);
        spawn_local(async move {
            commands::retry_persist(store, ctx).await;
            set_retrying.set(false);
        });
    };

    view! {
        <Show when=move || { store.unsaved().get() > 0 }>
            <div class="sync-badge">
                <span>
                    {move || {
                        let n = store.unsaved().get();
                        format!("{} unsaved change{}", n, if n == 1 { "" } else { "s" })
                    }}
                </span>
                <button class="retry-btn" disabled=move || retrying.get() on:click=retry>
                    {move || if retrying.get() { "Retrying..." } else { "Retry" }}
                </button>
            </div>
        </Show>
        <Show when=move || store.unsaved().get() == 0 && store.last_error().get().is_some()>
            <div class="sync-warning">
                {move || store.last_error().get().unwrap_or_default()}
            </div>
        </Show>
    }
}
