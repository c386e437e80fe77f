//! Vote Store
//!
//! Target-independent core of the vote board:
//! - domain: the item record and error vocabulary
//! - repository: storage trait plus an in-memory implementation
//! - sync: startup reconciliation, reset, per-vote persistence
//! - tally / countdown: view math
//! - export: xlsx snapshot
//! - config: board configuration

pub mod domain;
pub mod repository;
pub mod sync;
pub mod tally;
pub mod countdown;
pub mod export;
pub mod config;

pub use config::{BoardConfig, StorageConfig};
pub use domain::{DomainError, DomainResult, Entity, Item};
pub use repository::{MemoryRepository, Repository};
