//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! All in-memory board state lives here; persistence is a separate,
//! explicit call made after each transition (see `commands`).

use leptos::prelude::*;
use reactive_stores::Store;
use vote_store::{tally, DomainError, Item};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Board items in id order, optimistically updated
    pub items: Vec<Item>,
    /// Startup load finished (successfully or via fallback)
    pub loaded: bool,
    /// Writes that failed since the last successful resync
    pub unsaved: u32,
    /// Most recent storage problem, for display
    pub last_error: Option<String>,
    /// Order columns by votes instead of id
    pub leaderboard: bool,
}

impl AppState {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add a vote in memory, returning the updated record to persist
pub fn store_cast_vote(store: &AppStore, item_id: u32) -> Option<Item> {
    let items_field = store.items();
    let mut items = items_field.write();
    tally::cast_vote(&mut items, item_id)
}

/// Swap the whole board
pub fn store_replace_items(store: &AppStore, items: Vec<Item>) {
    *store.items().write() = items;
}

/// Count a failed write and remember why
pub fn store_record_failure(store: &AppStore, err: &DomainError) {
    *store.unsaved().write() += 1;
    *store.last_error().write() = Some(err.to_string());
}

/// Show a storage problem that didn't lose a write
pub fn store_record_warning(store: &AppStore, err: &DomainError) {
    *store.last_error().write() = Some(err.to_string());
}

/// Memory and storage agree again
pub fn store_clear_failures(store: &AppStore) {
    *store.unsaved().write() = 0;
    *store.last_error().write() = None;
}

pub fn store_toggle_leaderboard(store: &AppStore) {
    let leaderboard_field = store.leaderboard();
    let mut leaderboard = leaderboard_field.write();
    *leaderboard = !*leaderboard;
}
