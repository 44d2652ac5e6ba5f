//! Basic logger usage example
//!
//! Demonstrates named loggers from the registry, thresholds, the default
//! logger macros and persisting records as JSON lines.
//!
//! Run with: cargo run --example basic_usage

use rust_structured_logger::core::{identity, OutputFormat};
use rust_structured_logger::prelude::*;
use rust_structured_logger::{debug, edump, error, idump, ilog, info, warn, wlog};

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Basic Usage Example ===\n");

    identity::set_thread_name("main");
    identity::set_host_name("demo-host");

    // Configure the logger registered as "net"
    let net = Logger::builder()
        .name("net")
        .level(Severity::Debug)
        .sink(ConsoleSink::new())
        .build();
    update_logger("net", &net);

    println!("1. Logging at different levels:");
    let logger = get_logger("net");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Raising the threshold:");
    logger.set_level(Severity::Warn);
    println!("   Threshold set to WARN - debug and info won't show:");
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\n3. Default logger and dumps:");
    update_logger(
        DEFAULT_LOGGER,
        &Logger::builder().sink(ConsoleSink::new()).build(),
    );
    ilog!("Default logger at {}", Severity::Info);
    wlog!("Connection pool at {}% capacity", 85);
    let (retries, endpoint) = (3, "https://example.com");
    idump!(retries, endpoint);
    edump!(retries * 2);

    println!("\n4. Logfmt output:");
    logger.set_format(OutputFormat::Logfmt);
    warn!(logger, "Structured key=value output");

    println!("\n5. Persisting and replaying records:");
    let path = std::env::temp_dir().join("rust_structured_logger_demo.jsonl");
    let _ = std::fs::remove_file(&path);
    let persisted = Logger::builder()
        .name("persisted")
        .sink(JsonSink::new(&path)?)
        .build();
    info!(persisted, "First persisted record");
    error!(persisted, "Second persisted record");
    persisted.flush()?;

    for record in JsonSink::read_records(&path)? {
        println!("   {}", record.to_json()?);
    }
    let _ = std::fs::remove_file(&path);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
