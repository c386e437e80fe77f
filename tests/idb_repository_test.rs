//! IndexedDB repository tests, run in a browser with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use vote_board_ui::idb::IdbRepository;
use vote_store::sync::{load_board, reset_votes};
use vote_store::{Item, Repository, StorageConfig};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn storage(db_name: &str) -> StorageConfig {
    StorageConfig {
        db_name: db_name.to_string(),
        ..StorageConfig::default()
    }
}

fn defaults() -> Vec<Item> {
    vec![Item::new(1, "Product 1"), Item::new(2, "Product 2"), Item::new(3, "Product 3")]
}

#[wasm_bindgen_test]
async fn test_open_creates_empty_store() {
    let repo = IdbRepository::open(&storage("vote_test_open")).await.unwrap();
    repo.clear().await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.list().await.unwrap().is_empty());
}

#[wasm_bindgen_test]
async fn test_upsert_overwrites_by_id() {
    let repo = IdbRepository::open(&storage("vote_test_upsert")).await.unwrap();
    repo.clear().await.unwrap();

    repo.upsert(&Item::new(2, "Product 2")).await.unwrap();
    repo.upsert(&Item::new(2, "Product 2").with_votes(3)).await.unwrap();

    let items = repo.list().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 2);
    assert_eq!(items[0].votes, 3);
}

#[wasm_bindgen_test]
async fn test_replace_all_drops_other_rows() {
    let repo = IdbRepository::open(&storage("vote_test_replace")).await.unwrap();
    repo.clear().await.unwrap();
    repo.upsert(&Item::new(9, "Stale").with_votes(4)).await.unwrap();

    repo.replace_all(&defaults()).await.unwrap();

    let mut ids: Vec<u32> = repo.list().await.unwrap().iter().map(|i| i.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[wasm_bindgen_test]
async fn test_image_survives_round_trip() {
    let repo = IdbRepository::open(&storage("vote_test_image")).await.unwrap();
    repo.clear().await.unwrap();

    repo.upsert(&Item::new(1, "Product 1").with_image("img/p1.png")).await.unwrap();

    let items = repo.list().await.unwrap();
    assert_eq!(items[0].image.as_deref(), Some("img/p1.png"));
}

#[wasm_bindgen_test]
async fn test_load_board_reseeds_partial_store() {
    let repo = IdbRepository::open(&storage("vote_test_reseed")).await.unwrap();
    repo.replace_all(&[Item::new(1, "Product 1").with_votes(5), Item::new(2, "Product 2")])
        .await
        .unwrap();

    let startup = load_board(&repo, &defaults()).await;

    assert!(startup.warning.is_none());
    assert_eq!(startup.items.len(), 3);
    assert!(startup.items.iter().all(|i| i.votes == 0));
}

#[wasm_bindgen_test]
async fn test_reset_after_votes() {
    let repo = IdbRepository::open(&storage("vote_test_reset")).await.unwrap();
    repo.replace_all(&defaults()).await.unwrap();
    repo.upsert(&Item::new(3, "Product 3").with_votes(7)).await.unwrap();

    reset_votes(&repo, &defaults()).await.unwrap();

    let items = repo.list().await.unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.votes == 0));
}
