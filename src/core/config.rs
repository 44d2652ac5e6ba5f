//! Runtime configuration of sinks and loggers
//!
//! A [`LoggingConfig`] describes named sinks and the loggers that write to
//! them. Applying it builds everything first and only then publishes the
//! loggers, so a bad configuration leaves the registry untouched.
//!
//! ```
//! use rust_structured_logger::core::{LoggerRegistry, LoggingConfig, Severity};
//!
//! let config = LoggingConfig::from_json_str(r#"{
//!     "sinks": [ { "name": "mem", "kind": "memory" } ],
//!     "loggers": [
//!         { "name": "default", "level": "debug", "sinks": ["mem"] },
//!         { "name": "net", "parent": "default", "level": "warn" }
//!     ]
//! }"#).unwrap();
//!
//! let registry = LoggerRegistry::new();
//! config.apply(&registry).unwrap();
//! assert_eq!(registry.get("net").level(), Severity::Warn);
//! assert_eq!(registry.get("net").sinks().len(), 1);
//! ```

use super::{
    error::{LoggerError, Result},
    identity,
    layout::{PatternLayout, DEFAULT_PATTERN},
    logger::Logger,
    output_format::OutputFormat,
    registry::{LoggerRegistry, DEFAULT_LOGGER},
    severity::Severity,
    sink::SinkHandle,
};
use crate::sinks::{ConsoleSink, ConsoleStream, FileSink, JsonSink, MemorySink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Registry name the default-logger macros resolve
    pub default_logger: String,
    /// Text pattern for every configured logger
    pub pattern: String,
    /// Process-wide hostname recorded in new call contexts
    pub hostname: Option<String>,
    pub sinks: Vec<SinkConfig>,
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: SinkKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkKind {
    Console {
        #[serde(default = "default_colors")]
        colors: bool,
        #[serde(default)]
        stream: StreamConfig,
    },
    File {
        path: PathBuf,
    },
    Json {
        path: PathBuf,
    },
    Memory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamConfig {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    /// Threshold; inherited from the parent (or `info`) when omitted
    #[serde(default)]
    pub level: Option<Severity>,
    /// Logger whose configuration, as published by this same config, seeds this one
    #[serde(default)]
    pub parent: Option<String>,
    /// Sink names, attached after any inherited sinks
    #[serde(default)]
    pub sinks: Vec<String>,
}

fn default_colors() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_logger: DEFAULT_LOGGER.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            hostname: None,
            sinks: Vec::new(),
            loggers: Vec::new(),
        }
    }
}

impl From<StreamConfig> for ConsoleStream {
    fn from(stream: StreamConfig) -> Self {
        match stream {
            StreamConfig::Stdout => ConsoleStream::Stdout,
            StreamConfig::Stderr => ConsoleStream::Stderr,
        }
    }
}

impl SinkConfig {
    pub fn build(&self) -> Result<SinkHandle> {
        let handle = match &self.kind {
            SinkKind::Console { colors, stream } => {
                SinkHandle::new(ConsoleSink::with_colors(*colors).with_stream((*stream).into()))
            }
            SinkKind::File { path } => SinkHandle::new(FileSink::new(path)?),
            SinkKind::Json { path } => SinkHandle::new(JsonSink::new(path)?),
            SinkKind::Memory => SinkHandle::new(MemorySink::named(self.name.clone())),
        };
        Ok(handle)
    }
}

impl LoggingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logging configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    /// Open every configured sink, keyed by name.
    pub fn build_sinks(&self) -> Result<HashMap<String, SinkHandle>> {
        let mut sinks = HashMap::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            if sinks.insert(sink.name.clone(), sink.build()?).is_some() {
                return Err(LoggerError::config(
                    "sinks",
                    format!("sink '{}' is defined more than once", sink.name),
                ));
            }
        }
        Ok(sinks)
    }

    /// Build the sinks and publish every configured logger into `registry`.
    pub fn apply(&self, registry: &LoggerRegistry) -> Result<()> {
        let sinks = self.build_sinks()?;
        self.apply_with_sinks(registry, &sinks)
    }

    /// Like [`apply`](Self::apply), resolving sink names against `sinks`
    /// instead of opening the configured ones.
    pub fn apply_with_sinks(
        &self,
        registry: &LoggerRegistry,
        sinks: &HashMap<String, SinkHandle>,
    ) -> Result<()> {
        let format = OutputFormat::Text(PatternLayout::new(&self.pattern)?);
        let loggers = self.build_loggers(&format, sinks)?;

        if let Some(hostname) = &self.hostname {
            identity::set_host_name(hostname.clone());
        }
        for (name, logger) in &loggers {
            registry.update(name, logger);
        }
        registry.set_default_name(self.default_logger.clone());
        Ok(())
    }

    fn build_loggers(
        &self,
        format: &OutputFormat,
        sinks: &HashMap<String, SinkHandle>,
    ) -> Result<Vec<(String, Logger)>> {
        let mut built: Vec<(String, Logger)> = Vec::with_capacity(self.loggers.len());

        for entry in &self.loggers {
            if built.iter().any(|(name, _)| *name == entry.name) {
                return Err(LoggerError::config(
                    "loggers",
                    format!("logger '{}' is defined more than once", entry.name),
                ));
            }

            // Parents must appear earlier in the list
            let parent = match &entry.parent {
                Some(parent) => Some(
                    built
                        .iter()
                        .find(|(name, _)| name == parent)
                        .map(|(_, logger)| logger)
                        .ok_or_else(|| {
                            LoggerError::config(
                                "loggers",
                                format!("logger '{}' names unknown parent '{parent}'", entry.name),
                            )
                        })?,
                ),
                None => None,
            };

            let logger = Logger::from_parent(entry.name.clone(), parent);
            if parent.is_none() {
                logger.set_format(format.clone());
            }
            if let Some(level) = entry.level {
                logger.set_level(level);
            }
            for sink_name in &entry.sinks {
                let sink = sinks.get(sink_name).ok_or_else(|| {
                    LoggerError::config(
                        "loggers",
                        format!("logger '{}' names unknown sink '{sink_name}'", entry.name),
                    )
                })?;
                logger.add_sink(sink.clone());
            }

            built.push((entry.name.clone(), logger));
        }

        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallContext, LogRecord};
    use std::fs;
    use tempfile::tempdir;

    fn memory_sinks(names: &[&str]) -> (HashMap<String, SinkHandle>, Vec<MemorySink>) {
        let mut handles = HashMap::new();
        let mut sinks = Vec::new();
        for name in names {
            let sink = MemorySink::named(*name);
            handles.insert(name.to_string(), SinkHandle::new(sink.clone()));
            sinks.push(sink);
        }
        (handles, sinks)
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.default_logger, "default");
        assert_eq!(config.pattern, DEFAULT_PATTERN);
    }

    #[test]
    fn test_parse_sink_kinds() {
        let config = LoggingConfig::from_json_str(
            r#"{
                "sinks": [
                    { "name": "out", "kind": "console" },
                    { "name": "err", "kind": "console", "colors": false, "stream": "stderr" },
                    { "name": "app", "kind": "file", "path": "/tmp/app.log" },
                    { "name": "rec", "kind": "json", "path": "/tmp/app.jsonl" },
                    { "name": "mem", "kind": "memory" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.sinks[0].kind,
            SinkKind::Console {
                colors: true,
                stream: StreamConfig::Stdout
            }
        );
        assert_eq!(
            config.sinks[1].kind,
            SinkKind::Console {
                colors: false,
                stream: StreamConfig::Stderr
            }
        );
        assert_eq!(
            config.sinks[2].kind,
            SinkKind::File {
                path: PathBuf::from("/tmp/app.log")
            }
        );
        assert_eq!(config.sinks[4].kind, SinkKind::Memory);
    }

    #[test]
    fn test_rejects_unknown_level() {
        let err = LoggingConfig::from_json_str(r#"{ "loggers": [ { "name": "a", "level": "loud" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_apply_publishes_into_existing_handles() {
        let registry = LoggerRegistry::new();
        let cached = registry.get("svc");
        let (handles, sinks) = memory_sinks(&["mem"]);

        let config = LoggingConfig::from_json_str(
            r#"{
                "pattern": "{level} {message}",
                "loggers": [ { "name": "svc", "level": "debug", "sinks": ["mem"] } ]
            }"#,
        )
        .unwrap();
        config.apply_with_sinks(&registry, &handles).unwrap();

        assert_eq!(cached.level(), Severity::Debug);
        cached.log(LogRecord::new(
            CallContext::new(Severity::Debug, "svc.rs", 4, "run"),
            "configured",
        ));
        assert_eq!(sinks[0].lines(), vec!["debug configured".to_string()]);
    }

    #[test]
    fn test_parent_seeds_child() {
        let registry = LoggerRegistry::new();
        let (handles, _sinks) = memory_sinks(&["a", "b"]);

        let config = LoggingConfig::from_json_str(
            r#"{
                "loggers": [
                    { "name": "root", "level": "error", "sinks": ["a"] },
                    { "name": "child", "parent": "root", "sinks": ["b"] }
                ]
            }"#,
        )
        .unwrap();
        config.apply_with_sinks(&registry, &handles).unwrap();

        let child = registry.get("child");
        assert_eq!(child.level(), Severity::Error);
        let names: Vec<String> = child.sinks().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(registry.get("root").sinks().len(), 1);
    }

    #[test]
    fn test_failure_publishes_nothing() {
        let registry = LoggerRegistry::new();
        let (handles, _sinks) = memory_sinks(&["mem"]);

        let config = LoggingConfig::from_json_str(
            r#"{
                "default_logger": "main",
                "loggers": [
                    { "name": "good", "level": "debug", "sinks": ["mem"] },
                    { "name": "bad", "sinks": ["missing"] }
                ]
            }"#,
        )
        .unwrap();
        let err = config.apply_with_sinks(&registry, &handles).unwrap_err();

        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(!registry.contains("good"));
        assert_eq!(registry.default_name(), DEFAULT_LOGGER);
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let config = LoggingConfig::from_json_str(
            r#"{ "loggers": [ { "name": "child", "parent": "ghost" } ] }"#,
        )
        .unwrap();
        let err = config.apply(&LoggerRegistry::new()).unwrap_err();
        assert!(err.to_string().contains("unknown parent 'ghost'"));
    }

    #[test]
    fn test_duplicate_sink_names_are_rejected() {
        let config = LoggingConfig::from_json_str(
            r#"{ "sinks": [ { "name": "m", "kind": "memory" }, { "name": "m", "kind": "memory" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            config.build_sinks().unwrap_err(),
            LoggerError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = LoggingConfig {
            pattern: "{nonsense}".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.apply(&LoggerRegistry::new()).is_err());
    }

    #[test]
    fn test_from_file_with_file_sink() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");
        let config_path = dir.path().join("logging.json");
        let config = LoggingConfig {
            default_logger: "app".to_string(),
            pattern: "{level}|{message}".to_string(),
            sinks: vec![SinkConfig {
                name: "disk".to_string(),
                kind: SinkKind::File {
                    path: log_path.clone(),
                },
            }],
            loggers: vec![LoggerConfig {
                name: "app".to_string(),
                level: Some(Severity::Warn),
                parent: None,
                sinks: vec!["disk".to_string()],
            }],
            ..LoggingConfig::default()
        };
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

        let loaded = LoggingConfig::from_file(&config_path)?;
        assert_eq!(loaded, config);

        let registry = LoggerRegistry::new();
        loaded.apply(&registry)?;
        assert_eq!(registry.default_name(), "app");

        let logger = registry.default_logger();
        logger.log(LogRecord::new(
            CallContext::new(Severity::Warn, "app.rs", 1, "main"),
            "to disk",
        ));
        logger.flush()?;
        assert_eq!(fs::read_to_string(&log_path)?, "warn|to disk\n");
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let err = LoggingConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }
}
