//! Board Commands
//!
//! Every state transition the views trigger: update the store first, then
//! persist through the shared repository.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};

use vote_store::export::{self, ExportError};
use vote_store::{sync, DomainError, DomainResult, Item};

use crate::context::AppContext;
use crate::download::{offer_download, XLSX_MIME};
use crate::idb::IdbRepository;
use crate::store::{
    store_cast_vote, store_clear_failures, store_record_failure, store_record_warning,
    store_replace_items, AppStateStoreFields, AppStore,
};

fn storage_unavailable() -> DomainError {
    DomainError::storage("storage unavailable")
}

/// Open storage, reconcile it and fill the board.
///
/// On any failure the board shows the zeroed defaults and stays usable.
pub async fn start_up(store: AppStore, ctx: AppContext) {
    let defaults = ctx.config.default_items();

    let startup = match IdbRepository::open(&ctx.config.storage).await {
        Ok(repo) => {
            let startup = sync::load_board(&repo, &defaults).await;
            ctx.attach(std::rc::Rc::new(repo));
            startup
        }
        Err(e) => {
            error!("[APP] Failed to open storage: {}", e);
            sync::Startup {
                items: sync::zeroed_defaults(&defaults),
                warning: Some(e),
            }
        }
    };

    if let Some(warning) = &startup.warning {
        store_record_warning(&store, warning);
    }
    store_replace_items(&store, startup.items);
    *store.loaded().write() = true;
    ctx.mark_ready();
}

/// Count one vote now, persist it in the background
pub fn vote(store: AppStore, ctx: AppContext, item_id: u32) {
    let Some(updated) = store_cast_vote(&store, item_id) else {
        warn!("[VOTE] Unknown item {}", item_id);
        return;
    };
    info!("[VOTE] Item {} now at {}", updated.id, updated.votes);

    let Some(repo) = ctx.repository() else {
        store_record_failure(&store, &storage_unavailable());
        return;
    };
    spawn_local(async move {
        if let Err(e) = sync::persist_item(repo.as_ref(), &updated).await {
            store_record_failure(&store, &e);
        }
    });
}

/// Show the zeroed board, then wipe every vote in storage.
///
/// The board is zeroed before the reset write is queued, so a vote cast
/// while it is pending counts from zero and its write lands after the
/// reset, matching what is shown.
pub async fn reset_votes(store: AppStore, ctx: AppContext) -> DomainResult<()> {
    let repo = ctx.repository().ok_or_else(storage_unavailable)?;
    let defaults = ctx.config.default_items();
    store_replace_items(&store, sync::zeroed_defaults(&defaults));
    let started_with = store.unsaved().get_untracked();

    match sync::reset_votes(repo.as_ref(), &defaults).await {
        Ok(_) => {
            // Earlier failures are moot; ones recorded meanwhile still count
            let unsaved = sync::unsaved_after_retry(started_with, store.unsaved().get_untracked(), 0);
            if unsaved == 0 {
                store_clear_failures(&store);
            } else {
                *store.unsaved().write() = unsaved;
            }
            Ok(())
        }
        Err(e) => {
            // Storage still holds the old counts
            error!("[SYNC] Reset failed: {}", e);
            store_record_failure(&store, &e);
            Err(e)
        }
    }
}

/// Re-upsert every in-memory record after failed writes
pub async fn retry_persist(store: AppStore, ctx: AppContext) {
    let Some(repo) = ctx.repository() else {
        store_record_warning(&store, &storage_unavailable());
        return;
    };
    let items = store.items().get_untracked();
    let started_with = store.unsaved().get_untracked();

    let failed = sync::persist_all(repo.as_ref(), &items).await;
    let unsaved = sync::unsaved_after_retry(started_with, store.unsaved().get_untracked(), failed);
    if unsaved == 0 {
        info!("[SYNC] Retry stored all {} items", items.len());
        store_clear_failures(&store);
    } else {
        warn!("[SYNC] {} changes still unsaved after retry", unsaved);
        *store.unsaved().write() = unsaved;
    }
}

/// Read every stored record, sorted by id
pub async fn load_all(ctx: AppContext) -> DomainResult<Vec<Item>> {
    let repo = ctx.repository().ok_or_else(storage_unavailable)?;
    let mut items = repo.list().await?;
    vote_store::domain::sort_by_id(&mut items);
    Ok(items)
}

/// Build the workbook for `items` and hand it to the browser
pub fn export_snapshot(ctx: AppContext, items: &[Item]) -> Result<String, ExportError> {
    let layout = &ctx.config.export;
    let rows = export::export_rows(items);
    let bytes = export::build_workbook(&rows, layout)?;
    let file_name = export::export_file_name(&layout.label, Utc::now().date_naive());

    offer_download(&bytes, &file_name, XLSX_MIME)?;
    info!("[EXPORT] Offered {} ({} rows, {} bytes)", file_name, rows.len(), bytes.len());
    Ok(file_name)
}
