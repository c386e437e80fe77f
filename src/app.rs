//! Vote Board App
//!
//! Owns the store and context, starts storage once, and routes between
//! the voting view and the admin view.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::commands;
use crate::components::{AdminPage, VoteBoard};
use crate::config::board_config;
use crate::context::AppContext;
use crate::store::{AppState, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let config = board_config();
    let store: AppStore = Store::new(AppState::new(Vec::new()));
    let ctx = AppContext::new(config);

    provide_context(store);
    provide_context(ctx);

    // Storage is opened once and shared by both views
    spawn_local(commands::start_up(store, ctx));

    view! {
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                <Route path=path!("/") view=VoteBoard />
                <Route path=path!("/admin") view=AdminPage />
            </Routes>
        </Router>
    }
}
