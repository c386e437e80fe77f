//! Rolling Logger
//!
//! A `log` backend that keeps the most recent lines in a fixed-size circular
//! buffer and forwards every line to the browser console (wasm32) or stderr.
//! The buffer lets the UI show recent warnings without a log file.

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

/// One captured log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub at: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<5} {}: {}",
            self.at.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

pub struct RollingLogger {
    capacity: usize,
    level: LevelFilter,
    lines: Mutex<VecDeque<LogLine>>,
}

impl RollingLogger {
    pub fn new(capacity: usize, level: LevelFilter) -> Self {
        Self {
            capacity: capacity.max(1),
            level,
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Buffered lines, oldest first
    pub fn recent(&self) -> Vec<LogLine> {
        self.buffer().iter().cloned().collect()
    }

    /// Buffered lines at `level` or more severe, oldest first
    pub fn recent_at_least(&self, level: Level) -> Vec<LogLine> {
        self.buffer()
            .iter()
            .filter(|line| line.level <= level)
            .cloned()
            .collect()
    }

    fn buffer(&self) -> std::sync::MutexGuard<'_, VecDeque<LogLine>> {
        // Poisoned lock still holds valid lines
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, line: LogLine) {
        let mut lines = self.buffer();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = LogLine {
            at: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        emit(&line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &LogLine) {
    use wasm_bindgen::JsValue;
    let text = JsValue::from_str(&line.to_string());
    match line.level {
        Level::Error => web_sys::console::error_1(&text),
        Level::Warn => web_sys::console::warn_1(&text),
        Level::Info => web_sys::console::info_1(&text),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&text),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &LogLine) {
    eprintln!("{}", line);
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the global logger. Only the first call takes effect.
pub fn init(capacity: usize, level: LevelFilter) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(capacity, level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(logger)
}

/// Lines held by the global logger; empty before `init`
pub fn recent() -> Vec<LogLine> {
    LOGGER.get().map(RollingLogger::recent).unwrap_or_default()
}

/// Warnings and errors held by the global logger
pub fn recent_problems() -> Vec<LogLine> {
    LOGGER
        .get()
        .map(|logger| logger.recent_at_least(Level::Warn))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_line(logger: &RollingLogger, level: Level, n: usize) {
        logger.log(
            &Record::builder()
                .args(format_args!("line {}", n))
                .level(level)
                .target("test")
                .build(),
        );
    }

    #[test]
    fn test_buffer_rolls_over() {
        let logger = RollingLogger::new(3, LevelFilter::Info);
        for n in 0..5 {
            log_line(&logger, Level::Info, n);
        }
        let messages: Vec<String> = logger.recent().into_iter().map(|l| l.message).collect();
        assert_eq!(messages, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_level_filter() {
        let logger = RollingLogger::new(10, LevelFilter::Warn);
        log_line(&logger, Level::Info, 0);
        log_line(&logger, Level::Error, 1);
        log_line(&logger, Level::Warn, 2);
        assert_eq!(logger.recent().len(), 2);
        assert_eq!(logger.recent_at_least(Level::Error).len(), 1);
    }

    #[test]
    fn test_display_contains_target_and_message() {
        let logger = RollingLogger::new(1, LevelFilter::Trace);
        log_line(&logger, Level::Warn, 7);
        let text = logger.recent()[0].to_string();
        assert!(text.contains("WARN"));
        assert!(text.ends_with("test: line 7"));
    }
}
