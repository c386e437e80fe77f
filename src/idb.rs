//! IndexedDB Repository
//!
//! Browser-local implementation of `Repository<Item>`: one database, one
//! object store keyed by `id`. The database handle is opened once at startup
//! and shared; every operation runs in its own transaction and resolves only
//! when that transaction has completed.

use async_trait::async_trait;
use js_sys::{Function, Promise};
use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    DomException, Event, IdbDatabase, IdbObjectStore, IdbObjectStoreParameters, IdbOpenDbRequest,
    IdbRequest, IdbTransaction, IdbTransactionMode,
};

use vote_store::{DomainError, DomainResult, Item, Repository, StorageConfig};

/// Key path of the object store; matches `Item::id`
const KEY_PATH: &str = "id";

/// Handle to the opened vote database
pub struct IdbRepository {
    db: IdbDatabase,
    store_name: String,
}

impl IdbRepository {
    /// Open the database, creating the object store on first use
    pub async fn open(config: &StorageConfig) -> DomainResult<Self> {
        let window = web_sys::window().ok_or_else(|| DomainError::storage("no window"))?;
        let factory = window
            .indexed_db()
            .map_err(js_error)?
            .ok_or_else(|| DomainError::storage("IndexedDB is not available"))?;

        let request = factory
            .open_with_u32(&config.db_name, config.db_version)
            .map_err(js_error)?;

        let upgrade_request = request.clone();
        let store_name = config.store_name.clone();
        let on_upgrade = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let Err(e) = create_store(&upgrade_request, &store_name) {
                error!("[IDB] Failed to create object store: {}", js_error(e));
            }
        });
        request.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));

        let opened = request_done(&request).await;
        request.set_onupgradeneeded(None);
        drop(on_upgrade);

        let db: IdbDatabase = opened?
            .dyn_into()
            .map_err(|_| DomainError::storage("open request did not yield a database"))?;

        info!("[IDB] Opened {} v{}", config.db_name, config.db_version);
        Ok(Self {
            db,
            store_name: config.store_name.clone(),
        })
    }

    fn transaction(&self, mode: IdbTransactionMode) -> DomainResult<(IdbTransaction, IdbObjectStore)> {
        let tx = self
            .db
            .transaction_with_str_and_mode(&self.store_name, mode)
            .map_err(js_error)?;
        let store = tx.object_store(&self.store_name).map_err(js_error)?;
        Ok((tx, store))
    }
}

#[async_trait(?Send)]
impl Repository<Item> for IdbRepository {
    async fn list(&self) -> DomainResult<Vec<Item>> {
        let (tx, store) = self.transaction(IdbTransactionMode::Readonly)?;
        let request = store.get_all().map_err(js_error)?;
        transaction_done(&tx).await?;

        let value = request.result().map_err(js_error)?;
        let items: Vec<Item> = serde_wasm_bindgen::from_value(value)
            .map_err(|e| DomainError::storage(format!("decode: {}", e)))?;
        info!("[IDB] list found {} items", items.len());
        Ok(items)
    }

    async fn upsert(&self, item: &Item) -> DomainResult<()> {
        let value = encode(item)?;
        let (tx, store) = self.transaction(IdbTransactionMode::Readwrite)?;
        store.put(&value).map_err(js_error)?;
        transaction_done(&tx).await?;
        info!("[IDB] Item {} updated ({} votes)", item.id, item.votes);
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        let (tx, store) = self.transaction(IdbTransactionMode::Readwrite)?;
        store.clear().map_err(js_error)?;
        transaction_done(&tx).await
    }

    async fn count(&self) -> DomainResult<usize> {
        let (tx, store) = self.transaction(IdbTransactionMode::Readonly)?;
        let request = store.count().map_err(js_error)?;
        transaction_done(&tx).await?;

        let value = request.result().map_err(js_error)?;
        value
            .as_f64()
            .map(|n| n as usize)
            .ok_or_else(|| DomainError::storage("count did not return a number"))
    }

    async fn replace_all(&self, items: &[Item]) -> DomainResult<()> {
        // Encode up front so a bad record never leaves a half-written store
        let values = items.iter().map(encode).collect::<DomainResult<Vec<_>>>()?;

        let (tx, store) = self.transaction(IdbTransactionMode::Readwrite)?;
        let queued = (|| {
            store.clear()?;
            for value in &values {
                store.put(value)?;
            }
            Ok::<(), JsValue>(())
        })();
        if let Err(e) = queued {
            if let Err(abort) = tx.abort() {
                error!("[IDB] Failed to abort replace: {}", js_error(abort));
            }
            return Err(js_error(e));
        }

        transaction_done(&tx).await?;
        info!("[IDB] Store replaced with {} items", values.len());
        Ok(())
    }
}

fn create_store(request: &IdbOpenDbRequest, store_name: &str) -> Result<(), JsValue> {
    let db: IdbDatabase = request.result()?.dyn_into()?;
    if !db.object_store_names().contains(store_name) {
        let params = IdbObjectStoreParameters::new();
        params.set_key_path(&JsValue::from_str(KEY_PATH));
        db.create_object_store_with_optional_parameters(store_name, &params)?;
        info!("[IDB] Created object store '{}'", store_name);
    }
    Ok(())
}

fn encode(item: &Item) -> DomainResult<JsValue> {
    serde_wasm_bindgen::to_value(item).map_err(|e| DomainError::storage(format!("encode: {}", e)))
}

/// Resolves with the request's result on `success`, rejects on `error`
async fn request_done(request: &IdbRequest) -> DomainResult<JsValue> {
    let mut handlers: Vec<Closure<dyn FnMut(Event)>> = Vec::with_capacity(2);

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let done = request.clone();
        let on_success = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let value = done.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::UNDEFINED, &value);
        });
        let failed = request.clone();
        let on_error = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let reason = match failed.error() {
                Ok(Some(e)) => JsValue::from(e),
                _ => JsValue::from_str("request failed"),
            };
            let _ = reject.call1(&JsValue::UNDEFINED, &reason);
        });
        request.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        request.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        handlers.push(on_success);
        handlers.push(on_error);
    });

    let outcome = JsFuture::from(promise).await;
    request.set_onsuccess(None);
    request.set_onerror(None);
    drop(handlers);
    outcome.map_err(js_error)
}

/// Resolves on `complete`, rejects on `error` or `abort`
async fn transaction_done(tx: &IdbTransaction) -> DomainResult<()> {
    let mut handlers: Vec<Closure<dyn FnMut(Event)>> = Vec::with_capacity(2);

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let on_complete = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        let failed = tx.clone();
        let on_failure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let reason = match failed.error() {
                Some(e) => JsValue::from(e),
                None => JsValue::from_str("transaction aborted"),
            };
            let _ = reject.call1(&JsValue::UNDEFINED, &reason);
        });
        tx.set_oncomplete(Some(on_complete.as_ref().unchecked_ref()));
        tx.set_onerror(Some(on_failure.as_ref().unchecked_ref()));
        tx.set_onabort(Some(on_failure.as_ref().unchecked_ref()));
        handlers.push(on_complete);
        handlers.push(on_failure);
    });

    let outcome = JsFuture::from(promise).await;
    tx.set_oncomplete(None);
    tx.set_onerror(None);
    tx.set_onabort(None);
    drop(handlers);
    outcome.map(|_| ()).map_err(js_error)
}

/// Map any JS-side failure into a storage error
fn js_error(value: JsValue) -> DomainError {
    if let Some(e) = value.dyn_ref::<DomException>() {
        return DomainError::storage(format!("{}: {}", e.name(), e.message()));
    }
    DomainError::storage(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
