//! Vote Board Frontend
//!
//! Leptos CSR app: the voting view at `/`, the admin table and export at
//! `/admin`, persisted to IndexedDB.

pub mod app;
pub mod commands;
pub mod components;
pub mod config;
pub mod context;
pub mod download;
pub mod idb;
pub mod store;
