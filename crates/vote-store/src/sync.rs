//! Sync/Reset Protocol
//!
//! Startup reconciliation of the store against the default item list,
//! the explicit reset-to-zero, and the per-vote persistence boundary.
//!
//! Reconciliation is full-replace: any structural divergence (empty store,
//! different size, different id set) wipes the table and reseeds the
//! defaults with zero votes. Stored vote counts survive only when the id
//! sets match exactly.

use log::{error, info, warn};
use std::collections::BTreeSet;

use crate::domain::{sort_by_id, DomainError, DomainResult, Item};
use crate::repository::Repository;

/// Why the stored set was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    Empty,
    CountMismatch { stored: usize, expected: usize },
    IdMismatch { missing: Vec<u32>, unexpected: Vec<u32> },
}

/// Result of a startup reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Stored ids matched the defaults, nothing written
    Untouched,
    /// Store was wiped and reseeded
    Reseeded(Divergence),
}

/// Items to show after startup, plus the storage error if we had to fall back
#[derive(Debug, Clone)]
pub struct Startup {
    pub items: Vec<Item>,
    pub warning: Option<DomainError>,
}

/// Compare stored items with the defaults by id set
pub fn divergence(stored: &[Item], defaults: &[Item]) -> Option<Divergence> {
    if stored.is_empty() {
        return Some(Divergence::Empty);
    }
    if stored.len() != defaults.len() {
        return Some(Divergence::CountMismatch {
            stored: stored.len(),
            expected: defaults.len(),
        });
    }

    let stored_ids: BTreeSet<u32> = stored.iter().map(|i| i.id).collect();
    let default_ids: BTreeSet<u32> = defaults.iter().map(|i| i.id).collect();
    if stored_ids == default_ids {
        return None;
    }

    Some(Divergence::IdMismatch {
        missing: default_ids.difference(&stored_ids).copied().collect(),
        unexpected: stored_ids.difference(&default_ids).copied().collect(),
    })
}

/// Defaults with every counter cleared
pub fn zeroed_defaults(defaults: &[Item]) -> Vec<Item> {
    let mut items: Vec<Item> = defaults.iter().map(Item::zeroed).collect();
    sort_by_id(&mut items);
    items
}

/// Reconcile the store against `defaults`
pub async fn reconcile<R>(repo: &R, defaults: &[Item]) -> DomainResult<Reconciliation>
where
    R: Repository<Item> + ?Sized,
{
    let stored = repo.list().await?;

    match divergence(&stored, defaults) {
        None => {
            info!("[SYNC] Store holds {} items matching defaults, skipping init", stored.len());
            Ok(Reconciliation::Untouched)
        }
        Some(reason) => {
            warn!("[SYNC] Store diverged from defaults ({:?}), reseeding", reason);
            repo.replace_all(&zeroed_defaults(defaults)).await?;
            Ok(Reconciliation::Reseeded(reason))
        }
    }
}

/// Wipe every vote: reseed the defaults at zero in one transaction
pub async fn reset_votes<R>(repo: &R, defaults: &[Item]) -> DomainResult<Vec<Item>>
where
    R: Repository<Item> + ?Sized,
{
    let cleared = zeroed_defaults(defaults);
    repo.replace_all(&cleared).await?;
    info!("[SYNC] All votes cleared, {} items reset to zero", cleared.len());
    Ok(cleared)
}

/// Reconcile, then read the board back sorted by id.
///
/// Never fails: on any storage error, or if the store comes back empty,
/// the zeroed defaults are returned so the board stays usable.
pub async fn load_board<R>(repo: &R, defaults: &[Item]) -> Startup
where
    R: Repository<Item> + ?Sized,
{
    let loaded = match reconcile(repo, defaults).await {
        Ok(_) => repo.list().await,
        Err(e) => Err(e),
    };

    match loaded {
        Ok(mut items) if !items.is_empty() => {
            sort_by_id(&mut items);
            info!("[SYNC] Loaded {} items from store", items.len());
            Startup { items, warning: None }
        }
        Ok(_) => {
            warn!("[SYNC] Store returned no items, falling back to defaults");
            Startup {
                items: zeroed_defaults(defaults),
                warning: Some(DomainError::NotFound("stored items".into())),
            }
        }
        Err(e) => {
            error!("[SYNC] Failed to load items: {}", e);
            Startup {
                items: zeroed_defaults(defaults),
                warning: Some(e),
            }
        }
    }
}

/// Persist one record after an optimistic in-memory update
pub async fn persist_item<R>(repo: &R, item: &Item) -> DomainResult<()>
where
    R: Repository<Item> + ?Sized,
{
    repo.upsert(item).await.map_err(|e| {
        error!("[VOTE] Failed to persist item {} ({} votes): {}", item.id, item.votes, e);
        e
    })
}

/// Re-persist the whole in-memory board record by record.
///
/// Returns how many records failed.
pub async fn persist_all<R>(repo: &R, items: &[Item]) -> usize
where
    R: Repository<Item> + ?Sized,
{
    let mut failed = 0;
    for item in items {
        if persist_item(repo, item).await.is_err() {
            failed += 1;
        }
    }
    failed
}

/// Unsaved count once a retry finishes.
///
/// `started_with` is the count when the retry began and `current` the count
/// now; writes that failed while the retry ran are kept on top of the
/// records the retry itself could not store.
pub fn unsaved_after_retry(started_with: u32, current: u32, failed: usize) -> u32 {
    let failed_meanwhile = current.saturating_sub(started_with);
    failed_meanwhile.saturating_add(u32::try_from(failed).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use crate::tally::cast_vote;

    fn defaults() -> Vec<Item> {
        vec![Item::new(1, "Product 1"), Item::new(2, "Product 2"), Item::new(3, "Product 3")]
    }

    async fn stored_ids(repo: &MemoryRepository<Item>) -> Vec<u32> {
        let mut ids: Vec<u32> = repo.list().await.unwrap().iter().map(|i| i.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_divergence_classification() {
        let d = defaults();
        assert_eq!(divergence(&[], &d), Some(Divergence::Empty));
        assert_eq!(
            divergence(&d[..2], &d),
            Some(Divergence::CountMismatch { stored: 2, expected: 3 })
        );

        let swapped = vec![Item::new(1, "x"), Item::new(2, "y"), Item::new(9, "z")];
        assert_eq!(
            divergence(&swapped, &d),
            Some(Divergence::IdMismatch { missing: vec![3], unexpected: vec![9] })
        );

        let mut reordered = d.clone();
        reordered.reverse();
        assert_eq!(divergence(&reordered, &d), None);
    }

    #[tokio::test]
    async fn test_empty_store_is_seeded() {
        let repo = MemoryRepository::new();
        let outcome = reconcile(&repo, &defaults()).await.unwrap();

        assert_eq!(outcome, Reconciliation::Reseeded(Divergence::Empty));
        assert_eq!(stored_ids(&repo).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_item_wipes_and_reseeds() {
        let repo = MemoryRepository::with_rows([
            Item::new(1, "Product 1").with_votes(4),
            Item::new(2, "Product 2").with_votes(7),
        ]);

        let outcome = reconcile(&repo, &defaults()).await.unwrap();
        assert!(matches!(outcome, Reconciliation::Reseeded(Divergence::CountMismatch { .. })));

        let mut items = repo.list().await.unwrap();
        sort_by_id(&mut items);
        assert_eq!(items, zeroed_defaults(&defaults()));
    }

    #[tokio::test]
    async fn test_foreign_id_is_reverted() {
        let repo = MemoryRepository::with_rows([
            Item::new(1, "Product 1"),
            Item::new(2, "Product 2"),
            Item::new(42, "Manual edit"),
        ]);

        reconcile(&repo, &defaults()).await.unwrap();
        assert_eq!(stored_ids(&repo).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_matching_store_keeps_votes() {
        let repo = MemoryRepository::with_rows([
            Item::new(3, "Product 3").with_votes(1),
            Item::new(1, "Product 1").with_votes(5),
            Item::new(2, "Product 2"),
        ]);

        let outcome = reconcile(&repo, &defaults()).await.unwrap();
        assert_eq!(outcome, Reconciliation::Untouched);
        assert_eq!(repo.write_count(), 0);
        assert_eq!(repo.get(1).unwrap().votes, 5);
    }

    #[tokio::test]
    async fn test_reset_zeroes_everything_and_drops_extras() {
        let repo = MemoryRepository::with_rows([
            Item::new(1, "Product 1").with_votes(9),
            Item::new(2, "Product 2").with_votes(3),
            Item::new(3, "Product 3").with_votes(1),
            Item::new(8, "Extra").with_votes(2),
        ]);

        let cleared = reset_votes(&repo, &defaults()).await.unwrap();
        assert!(cleared.iter().all(|i| i.votes == 0));

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|i| i.votes == 0));
        assert_eq!(stored_ids(&repo).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_load_board_sorts_by_id() {
        let repo = MemoryRepository::with_rows([
            Item::new(3, "Product 3"),
            Item::new(1, "Product 1").with_votes(2),
            Item::new(2, "Product 2"),
        ]);

        let startup = load_board(&repo, &defaults()).await;
        assert!(startup.warning.is_none());
        let ids: Vec<u32> = startup.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(startup.items[0].votes, 2);
    }

    #[tokio::test]
    async fn test_load_board_falls_back_when_storage_fails() {
        let repo = MemoryRepository::new();
        repo.set_fail_writes(true);

        let startup = load_board(&repo, &defaults()).await;
        assert!(matches!(startup.warning, Some(DomainError::Storage(_))));
        assert_eq!(startup.items, zeroed_defaults(&defaults()));
    }

    #[tokio::test]
    async fn test_repeated_votes_persist_final_count() {
        let repo = MemoryRepository::new();
        let mut board = load_board(&repo, &defaults()).await.items;

        for _ in 0..3 {
            let updated = cast_vote(&mut board, 2).expect("item 2 exists");
            persist_item(&repo, &updated).await.unwrap();
        }

        assert_eq!(board.iter().find(|i| i.id == 2).unwrap().votes, 3);
        assert_eq!(repo.get(2).unwrap(), Item::new(2, "Product 2").with_votes(3));
    }

    #[tokio::test]
    async fn test_failed_persist_diverges_until_resync() {
        let repo = MemoryRepository::new();
        let mut board = load_board(&repo, &defaults()).await.items;

        repo.set_fail_writes(true);
        let updated = cast_vote(&mut board, 1).unwrap();
        assert!(persist_item(&repo, &updated).await.is_err());
        assert_eq!(board[0].votes, 1);
        assert_eq!(repo.get(1).unwrap().votes, 0);

        repo.set_fail_writes(false);
        assert_eq!(persist_all(&repo, &board).await, 0);
        assert_eq!(repo.get(1).unwrap().votes, 1);
    }

    #[tokio::test]
    async fn test_vote_during_reset_matches_store() {
        let repo = MemoryRepository::with_rows([
            Item::new(1, "Product 1").with_votes(4),
            Item::new(2, "Product 2").with_votes(6),
            Item::new(3, "Product 3"),
        ]);

        let defaults = defaults();

        // Board is zeroed before the reset write is queued
        let mut board = zeroed_defaults(&defaults);
        let reset = reset_votes(&repo, &defaults);

        // A click while the reset is pending queues its write after it
        let updated = cast_vote(&mut board, 2).unwrap();
        let vote = persist_item(&repo, &updated);

        reset.await.unwrap();
        vote.await.unwrap();

        let mut stored = repo.list().await.unwrap();
        sort_by_id(&mut stored);
        assert_eq!(stored, board);
        assert_eq!(repo.get(2).unwrap().votes, 1);
    }

    #[test]
    fn test_unsaved_after_retry_keeps_new_failures() {
        assert_eq!(unsaved_after_retry(3, 3, 0), 0);
        assert_eq!(unsaved_after_retry(3, 3, 1), 1);
        // Two votes failed while the retry was running
        assert_eq!(unsaved_after_retry(3, 5, 0), 2);
        assert_eq!(unsaved_after_retry(3, 5, 1), 3);
        // Counter was cleared elsewhere meanwhile
        assert_eq!(unsaved_after_retry(3, 0, 1), 1);
    }
}
