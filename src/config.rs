//! Board configuration, embedded at compile time from `vote.config.json`.

use log::{info, warn, LevelFilter};
use std::sync::OnceLock;
use vote_store::BoardConfig;

const CONFIG_JSON: &str = include_str!("../vote.config.json");

static CONFIG: OnceLock<BoardConfig> = OnceLock::new();

/// Parse the embedded config and install the logger sized from it.
///
/// Call once from `main`, before mounting.
pub fn init() -> &'static BoardConfig {
    let parsed = BoardConfig::from_json(CONFIG_JSON);
    let capacity = parsed
        .as_ref()
        .map(|config| config.log_capacity)
        .unwrap_or_else(|_| BoardConfig::default().log_capacity);

    if rolling_logger::init(capacity, LevelFilter::Info).is_err() {
        web_sys::console::warn_1(&"[CONFIG] Logger already installed".into());
    }

    let config = parsed.unwrap_or_else(|e| {
        warn!("[CONFIG] {}, using defaults", e);
        BoardConfig::default()
    });
    info!("[CONFIG] Board '{}' with {} items", config.title, config.items.len());
    CONFIG.get_or_init(|| config)
}

/// The active configuration
pub fn board_config() -> &'static BoardConfig {
    CONFIG.get_or_init(|| BoardConfig::from_json_or_default(CONFIG_JSON))
}
