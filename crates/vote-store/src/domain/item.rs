//! Item Entity
//!
//! One candidate on the board together with its running vote count.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A candidate item and its tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable identifier (also the storage key)
    pub id: u32,
    /// Display name
    pub name: String,
    /// Votes received so far
    #[serde(default)]
    pub votes: u32,
    /// Optional image path, relative to the site root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Item {
    /// Create an item with zero votes and no image
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            votes: 0,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_votes(mut self, votes: u32) -> Self {
        self.votes = votes;
        self
    }

    /// Same item with the counter cleared
    pub fn zeroed(&self) -> Self {
        Self {
            votes: 0,
            ..self.clone()
        }
    }

    /// Add one vote. Counts never wrap.
    pub fn add_vote(&mut self) {
        self.votes = self.votes.saturating_add(1);
    }
}

impl Entity for Item {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Sort a list of items by id, the canonical display and export order
pub fn sort_by_id(items: &mut [Item]) {
    items.sort_by_key(|item| item.id);
}
