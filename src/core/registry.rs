//! Process-wide directory of named loggers
//!
//! `get` creates a logger on first reference to a name and hands out the same
//! underlying logger afterwards. `update` installs a new configuration into
//! the registered logger, so every handle already obtained for that name
//! (including those cached at call sites) sees it.
//!
//! The directory lock only covers lookup and insertion; rendering and sink
//! I/O happen after it is released.

use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Name of the logger used by the default-logger macros unless reconfigured.
pub const DEFAULT_LOGGER: &str = "default";

static GLOBAL_REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Logger>>,
    default_name: RwLock<String>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            default_name: RwLock::new(DEFAULT_LOGGER.to_string()),
        }
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL_REGISTRY.get_or_init(LoggerRegistry::new)
    }

    /// Look up `name`, creating a default logger the first time it is seen.
    pub fn get(&self, name: &str) -> Logger {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }

        // Re-checked under the write lock: a racing thread may have inserted it
        self.loggers
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Logger::new(name))
            .clone()
    }

    /// Replace the configuration registered under `name` with `logger`'s.
    ///
    /// The registered handle keeps its identity; `logger` itself stays a
    /// separate logger and later changes to it are not published.
    pub fn update(&self, name: &str, logger: &Logger) {
        self.get(name).install(logger);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_name(&self) -> String {
        self.default_name.read().clone()
    }

    pub fn set_default_name(&self, name: impl Into<String>) {
        *self.default_name.write() = name.into();
    }

    pub fn default_logger(&self) -> Logger {
        let name = self.default_name();
        self.get(&name)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Logger registered under `name` in the global registry.
pub fn get_logger(name: &str) -> Logger {
    LoggerRegistry::global().get(name)
}

/// Publish `logger`'s configuration under `name` in the global registry.
pub fn update_logger(name: &str, logger: &Logger) {
    LoggerRegistry::global().update(name, logger);
}

/// The global default logger.
pub fn default_logger() -> Logger {
    LoggerRegistry::global().default_logger()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Severity, SinkHandle};
    use crate::sinks::MemorySink;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_get_creates_once() {
        let registry = LoggerRegistry::new();
        assert!(!registry.contains("x"));

        let first = registry.get("x");
        let second = registry.get("x");
        assert_eq!(first, second);
        assert_eq!(first.name(), "x");
        assert_eq!(first.level(), Severity::Info);
        assert!(registry.contains("x"));
    }

    #[test]
    fn test_distinct_names_are_distinct_loggers() {
        let registry = LoggerRegistry::new();
        assert_ne!(registry.get("a"), registry.get("b"));
        assert_eq!(registry.names(), ["a", "b"]);
    }

    #[test]
    fn test_update_is_seen_by_existing_handles() {
        let registry = LoggerRegistry::new();
        let cached = registry.get("net");

        let configured = Logger::new("net");
        configured
            .set_level(Severity::Debug)
            .add_sink(SinkHandle::new(MemorySink::new()));
        registry.update("net", &configured);

        assert_eq!(cached.level(), Severity::Debug);
        assert_eq!(registry.get("net").sinks().len(), 1);
        assert_eq!(registry.get("net"), cached);
    }

    #[test]
    fn test_update_snapshot_semantics() {
        let registry = LoggerRegistry::new();
        let configured = Logger::new("db");
        configured.set_level(Severity::Warn);
        registry.update("db", &configured);

        configured.set_level(Severity::Debug);
        assert_eq!(registry.get("db").level(), Severity::Warn);
    }

    #[test]
    fn test_update_unseen_name_registers_it() {
        let registry = LoggerRegistry::new();
        let configured = Logger::new("whatever");
        configured.set_level(Severity::Error);
        registry.update("fresh", &configured);

        let fresh = registry.get("fresh");
        assert_eq!(fresh.level(), Severity::Error);
        assert_eq!(fresh.name(), "fresh");
    }

    #[test]
    fn test_update_with_registered_logger() {
        let registry = LoggerRegistry::new();
        let logger = registry.get("self");
        logger.set_level(Severity::Warn);
        registry.update("self", &logger);
        assert_eq!(registry.get("self").level(), Severity::Warn);
    }

    #[test]
    fn test_default_logger_name() {
        let registry = LoggerRegistry::new();
        assert_eq!(registry.default_name(), DEFAULT_LOGGER);
        assert_eq!(registry.default_logger().name(), DEFAULT_LOGGER);

        registry.set_default_name("app");
        assert_eq!(registry.default_logger(), registry.get("app"));
    }

    #[test]
    fn test_concurrent_get_yields_one_instance() {
        let registry = Arc::new(LoggerRegistry::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry.get("race")
                })
            })
            .collect();

        let loggers: Vec<Logger> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for logger in &loggers {
            assert_eq!(logger, &loggers[0]);
        }
    }
}
