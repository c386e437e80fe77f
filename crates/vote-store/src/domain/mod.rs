//! Domain Layer
//!
//! Entities and the error vocabulary shared by every other module.
//! No storage or UI concerns live here.

mod entity;
mod item;

pub use entity::{Entity, DomainError, DomainResult};
pub use item::{Item, sort_by_id};
