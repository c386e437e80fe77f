//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use std::rc::Rc;
use vote_store::{BoardConfig, Item, Repository};

/// Shared storage handle, stored locally because browser handles are `!Send`
pub type SharedRepository = Rc<dyn Repository<Item>>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Storage handle, acquired once at startup; `None` if storage is unavailable
    repository: StoredValue<Option<SharedRepository>, LocalStorage>,
    /// Startup has finished trying to open storage
    pub storage_ready: RwSignal<bool>,
    pub config: &'static BoardConfig,
}

impl AppContext {
    pub fn new(config: &'static BoardConfig) -> Self {
        Self {
            repository: StoredValue::new_local(None),
            storage_ready: RwSignal::new(false),
            config,
        }
    }

    /// Hand over the opened storage handle
    pub fn attach(&self, repository: SharedRepository) {
        self.repository.set_value(Some(repository));
    }

    pub fn repository(&self) -> Option<SharedRepository> {
        self.repository.get_value()
    }

    pub fn mark_ready(&self) {
        self.storage_ready.set(true);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
