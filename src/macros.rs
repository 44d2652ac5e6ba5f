//! Logging macros for ergonomic log message formatting.
//!
//! Every macro checks the logger's threshold before doing anything else; the
//! call-site context and the message are only built for enabled records.
//! A panic while formatting or writing is contained and reported on stderr.
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::info;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().name("server").sink(sink.clone()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! assert_eq!(sink.records()[1].message(), "Server listening on port 8080");
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_structured_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let severity: $crate::Severity = $severity;
        // Result deliberately ignored: a contained panic is already reported
        let _ = $crate::core::diagnostic::contain(file!(), line!(), || {
            if logger.is_enabled(severity) {
                let context = $crate::CallContext::new(
                    severity,
                    file!(),
                    u64::from(line!()),
                    module_path!(),
                );
                logger.log($crate::LogRecord::new(context, format!($($arg)+)));
            }
        });
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::new("app");
/// # logger.set_level(Severity::Debug);
/// use rust_structured_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use rust_structured_logger::warn;
/// warn!(logger, "Retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log through the registry's default logger.
///
/// The logger handle is looked up once per call site. Reconfiguring it with
/// [`update_logger`](crate::update_logger) is still seen here, since the
/// cached handle is the registered one.
#[doc(hidden)]
#[macro_export]
macro_rules! __default_log {
    ($severity:expr, $($arg:tt)+) => {{
        if !$crate::LOGGING_DISABLED {
            static CALL_SITE_LOGGER: ::std::sync::OnceLock<$crate::Logger> =
                ::std::sync::OnceLock::new();
            let logger = CALL_SITE_LOGGER.get_or_init($crate::default_logger);
            $crate::log!(*logger, $severity, $($arg)+);
        }
    }};
}

/// Log a debug-level message through the default logger.
///
/// # Examples
///
/// ```
/// use rust_structured_logger::dlog;
/// dlog!("cache warmed with {} entries", 128);
/// ```
#[macro_export]
macro_rules! dlog {
    ($($arg:tt)+) => {
        $crate::__default_log!($crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message through the default logger.
#[macro_export]
macro_rules! ilog {
    ($($arg:tt)+) => {
        $crate::__default_log!($crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message through the default logger.
#[macro_export]
macro_rules! wlog {
    ($($arg:tt)+) => {
        $crate::__default_log!($crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message through the default logger.
#[macro_export]
macro_rules! elog {
    ($($arg:tt)+) => {
        $crate::__default_log!($crate::Severity::Error, $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dump {
    ($severity:expr, $($value:expr),+ $(,)?) => {
        $crate::__default_log!($severity, "{}", {
            use ::std::fmt::Write as _;
            let mut dump = ::std::string::String::new();
            $( let _ = write!(dump, "{}: {} ", stringify!($value), $value); )+
            dump
        })
    };
}

/// Log each expression as `expr: value ` at info level through the default logger.
///
/// # Examples
///
/// ```
/// use rust_structured_logger::idump;
/// let (retries, host) = (3, "db-1");
/// idump!(retries, host); // "retries: 3 host: db-1 "
/// ```
#[macro_export]
macro_rules! idump {
    ($($value:expr),+ $(,)?) => {
        $crate::__dump!($crate::Severity::Info, $($value),+)
    };
}

/// Like [`idump!`] at warning level.
#[macro_export]
macro_rules! wdump {
    ($($value:expr),+ $(,)?) => {
        $crate::__dump!($crate::Severity::Warn, $($value),+)
    };
}

/// Like [`idump!`] at error level.
#[macro_export]
macro_rules! edump {
    ($($value:expr),+ $(,)?) => {
        $crate::__dump!($crate::Severity::Error, $($value),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Logger, Severity};
    use crate::sinks::MemorySink;
    use std::cell::Cell;
    use std::fmt;

    fn captured(level: Severity) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .name("macros")
            .level(level)
            .sink(sink.clone())
            .build();
        (logger, sink)
    }

    struct Counted<'a>(&'a Cell<u32>);

    impl fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            f.write_str("counted")
        }
    }

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("display exploded")
        }
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = captured(Severity::Info);
        log!(logger, Severity::Info, "Test message");
        log!(logger, Severity::Warn, "Formatted: {}", 42);

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "Test message");
        assert_eq!(records[1].message(), "Formatted: 42");
        assert_eq!(records[1].context().severity(), Severity::Warn);
    }

    #[test]
    fn test_macros_capture_call_site() {
        let (logger, sink) = captured(Severity::Debug);
        let line = line!() + 1;
        debug!(logger, "here");

        let records = sink.records();
        let ctx = records[0].context();
        assert_eq!(ctx.file(), "macros.rs");
        assert_eq!(ctx.line(), u64::from(line));
        assert_eq!(ctx.method(), module_path!());
        assert_eq!(ctx.severity(), Severity::Debug);
    }

    #[test]
    fn test_level_macros_respect_threshold() {
        let (logger, sink) = captured(Severity::Warn);
        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let messages: Vec<String> = sink.records().iter().map(|r| r.message().to_string()).collect();
        assert_eq!(messages, vec!["Retry 1 of 3", "Code: 500"]);
    }

    #[test]
    fn test_disabled_statement_does_not_format() {
        let (logger, sink) = captured(Severity::Off);
        let formatted = Cell::new(0);
        error!(logger, "{}", Counted(&formatted));
        assert_eq!(formatted.get(), 0);
        assert!(sink.is_empty());

        logger.set_level(Severity::Error);
        error!(logger, "{}", Counted(&formatted));
        assert_eq!(formatted.get(), 1);
        assert_eq!(sink.records()[0].message(), "counted");
    }

    #[test]
    fn test_panicking_argument_is_contained() {
        let (logger, sink) = captured(Severity::Info);
        info!(logger, "{}", Unprintable);
        info!(logger, "still alive");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "still alive");
    }

    #[test]
    fn test_accepts_logger_reference() {
        let (logger, sink) = captured(Severity::Info);
        let by_ref = &logger;
        info!(by_ref, "through a reference");
        assert_eq!(sink.len(), 1);
    }

    // The only test in this binary that touches the global default logger
    #[cfg(not(feature = "disable-logging"))]
    #[test]
    fn test_default_logger_macros() {
        use crate::core::{update_logger, DEFAULT_LOGGER};

        let sink = MemorySink::new();
        let configured = Logger::builder()
            .level(Severity::Debug)
            .sink(sink.clone())
            .build();
        update_logger(DEFAULT_LOGGER, &configured);

        dlog!("debug {}", 1);
        ilog!("info");
        wlog!("warn");
        elog!("error");

        let retries = 3;
        let host = "db-1";
        idump!(retries, host);
        wdump!(retries + 1);
        edump!(host,);

        let records = sink.records();
        let messages: Vec<&str> = records.iter().map(|r| r.message()).collect();
        assert_eq!(
            messages,
            vec![
                "debug 1",
                "info",
                "warn",
                "error",
                "retries: 3 host: db-1 ",
                "retries + 1: 4 ",
                "host: db-1 ",
            ]
        );
        assert_eq!(records[4].context().severity(), Severity::Info);
        assert_eq!(records[5].context().severity(), Severity::Warn);
        assert_eq!(records[6].context().severity(), Severity::Error);

        // Call sites keep their cached handle and still see reconfiguration
        let quiet = Logger::builder()
            .level(Severity::Error)
            .sink(sink.clone())
            .build();
        update_logger(DEFAULT_LOGGER, &quiet);
        for _ in 0..2 {
            ilog!("suppressed");
        }
        assert_eq!(sink.len(), 7);
    }
}
