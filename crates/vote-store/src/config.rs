//! Board configuration.
//!
//! Every field has a default, so a partial JSON document only overrides
//! what it names. The defaults reproduce the stock three-product board.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{DomainError, DomainResult, Item};
use crate::export::ExportLayout;
use crate::tally::DEFAULT_MIN_SCALE;

/// IndexedDB names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_name: String,
    pub db_version: u32,
    pub store_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_name: "ProductVoteDB".into(),
            db_version: 1,
            store_name: "products".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub title: String,
    /// Shown in the header next to the countdown
    pub check_in_count: u32,
    pub countdown_seconds: u32,
    /// Floor for the bar scale so a handful of votes doesn't fill the column
    pub min_scale: u32,
    /// Optional background image path
    pub background: Option<String>,
    /// Lines kept by the in-memory logger
    pub log_capacity: usize,
    pub storage: StorageConfig,
    pub export: ExportLayout,
    /// The fixed candidate set; votes given here are ignored
    pub items: Vec<Item>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Star Trio".into(),
            check_in_count: 2,
            countdown_seconds: 57 * 60 + 6,
            min_scale: DEFAULT_MIN_SCALE,
            background: Some("bg.jpg".into()),
            log_capacity: 200,
            storage: StorageConfig::default(),
            export: ExportLayout::default(),
            items: (1..=3).map(|id| Item::new(id, format!("Product {}", id))).collect(),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: BoardConfig = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidInput(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_json`, but never fails: bad input logs and yields the defaults
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("[CONFIG] {}, using defaults", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.items.is_empty() {
            return Err(DomainError::InvalidInput("config: item list is empty".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.items.iter().find(|item| !seen.insert(item.id)) {
            return Err(DomainError::Conflict(format!("config: duplicate item id {}", dup.id)));
        }
        if self.storage.db_version == 0 {
            return Err(DomainError::InvalidInput("config: db_version must be >= 1".into()));
        }
        Ok(())
    }

    /// The default item set with every counter at zero
    pub fn default_items(&self) -> Vec<Item> {
        crate::sync::zeroed_defaults(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BoardConfig::default();
        config.validate().unwrap();
        assert_eq!(config.default_items().len(), 3);
        assert_eq!(config.storage.store_name, "products");
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = BoardConfig::from_json(
            r#"{ "title": "Finals", "items": [{"id": 10, "name": "X", "votes": 4, "image": "x.png"}] }"#,
        )
        .unwrap();
        assert_eq!(config.title, "Finals");
        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.default_items(), vec![Item::new(10, "X").with_image("x.png")]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = BoardConfig::from_json(r#"{ "items": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}] }"#)
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(BoardConfig::from_json_or_default("{ nope"), BoardConfig::default());
        assert_eq!(BoardConfig::from_json_or_default(r#"{"items": []}"#), BoardConfig::default());
    }
}
